//! Text rendering for the overview cards and the token/pair tables

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt::Write;
use crate::{
    table::{PairColumn, SortColumn, SortState, TablePage, TokenColumn},
    types::{PairRecord, TokenAggregate, Totals},
    utils::{format_currency, format_percent, format_price},
};

pub const WIDE_BREAKPOINT: usize = 100;
pub const NARROW_BREAKPOINT: usize = 80;

/// Column visibility derived from the terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub show_address: bool,
    pub name_max_chars: usize,
}

impl Layout {
    pub fn for_width(width: usize) -> Self {
        Self {
            show_address: width >= WIDE_BREAKPOINT,
            name_max_chars: if width < NARROW_BREAKPOINT { 8 } else { 16 },
        }
    }
}

/// Shortens `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_name(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

fn header<C: SortColumn>(sort: &SortState<C>, column: C) -> String {
    format!("{}{}", column.label(), sort.indicator(column))
}

fn footer(out: &mut String, page: usize, page_count: usize, total_rows: usize, noun: &str) {
    let _ = writeln!(out, "Page {} of {} ({} {})", page, page_count, total_rows, noun);
}

pub fn render_overview(
    totals: &Totals,
    reference_price: Option<Decimal>,
    skipped: usize,
    updated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "DEX OVERVIEW");
    let _ = writeln!(out, "  Total Value Locked : {}", format_currency(Some(totals.tvl)));
    let _ = writeln!(out, "  Volume 24H         : {}", format_currency(Some(totals.volume)));
    let reference = reference_price
        .map(|p| format_price(Some(p)))
        .unwrap_or_else(|| "n/a".to_string());
    let _ = writeln!(out, "  Reference Price    : {}", reference);
    if skipped > 0 {
        let _ = writeln!(out, "  Skipped Records    : {}", skipped);
    }
    let _ = writeln!(out, "  Updated            : {}", updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    out
}

pub fn render_token_table(page: &TablePage<'_, TokenAggregate>, layout: Layout) -> String {
    let name_width = layout.name_max_chars + 2;
    let mut out = String::new();

    let _ = write!(
        out,
        "{:<5}{:<name_width$}",
        "#",
        header(&page.sort, TokenColumn::Name),
    );
    if layout.show_address {
        let _ = write!(out, "{:<44}", "Address");
    }
    let _ = writeln!(
        out,
        "{:<10}{:>14}{:>20}{:>20}",
        header(&page.sort, TokenColumn::Symbol),
        header(&page.sort, TokenColumn::Price),
        header(&page.sort, TokenColumn::Volume),
        header(&page.sort, TokenColumn::Tvl),
    );

    for (i, token) in page.rows.iter().enumerate() {
        let _ = write!(
            out,
            "{:<5}{:<name_width$}",
            page.offset + i + 1,
            truncate_name(&token.name, layout.name_max_chars),
        );
        if layout.show_address {
            let _ = write!(out, "{:<44}", token.address);
        }
        let _ = writeln!(
            out,
            "{:<10}{:>14}{:>20}{:>20}",
            truncate_name(&token.symbol, 9),
            format_price(Some(token.usd_price)),
            format_currency(Some(token.volume)),
            format_currency(Some(token.tvl)),
        );
    }

    footer(&mut out, page.page, page.page_count, page.total_rows, "tokens");
    out
}

pub fn render_pair_table(page: &TablePage<'_, PairRecord>, layout: Layout) -> String {
    let name_width = layout.name_max_chars * 2 + 3;
    let mut out = String::new();

    let _ = write!(
        out,
        "{:<5}{:<name_width$}",
        "#",
        header(&page.sort, PairColumn::Name),
    );
    if layout.show_address {
        let _ = write!(out, "{:<44}", "Address");
    }
    let _ = writeln!(
        out,
        "{:>20}{:>20}{:>16}{:>12}",
        header(&page.sort, PairColumn::Tvl),
        header(&page.sort, PairColumn::Volume),
        header(&page.sort, PairColumn::Fees),
        header(&page.sort, PairColumn::Apr),
    );

    for (i, pair) in page.rows.iter().enumerate() {
        let label = format!(
            "{}-{}",
            truncate_name(&pair.token0.symbol, layout.name_max_chars),
            truncate_name(&pair.token1.symbol, layout.name_max_chars),
        );
        let _ = write!(out, "{:<5}{:<name_width$}", page.offset + i + 1, label);
        if layout.show_address {
            let _ = write!(out, "{:<44}", pair.address.as_deref().unwrap_or("-"));
        }
        let _ = writeln!(
            out,
            "{:>20}{:>20}{:>16}{:>12}",
            format_currency(Some(pair.total_reserve_usd)),
            format_currency(Some(pair.total_volume_usd)),
            format_currency(Some(pair.lp_fees_24h_usd)),
            format_percent(pair.annualized_fee_apr),
        );
    }

    footer(&mut out, page.page, page.page_count, page.total_rows, "pairs");
    out
}
