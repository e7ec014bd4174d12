//! Currency, price and percentage formatting

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::str::FromStr;

const PRICE_DECIMALS: u32 = 6;
const MIN_DISPLAY_PRICE: Decimal = dec!(0.000001);

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders `value` with `decimals` places, thousands separators and a `$`.
fn dollars(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return format!("${:.*}", decimals as usize, Decimal::ZERO);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    match frac_part {
        Some(frac) => format!("{}${}.{}", sign, group_thousands(int_part), frac),
        None => format!("{}${}", sign, group_thousands(int_part)),
    }
}

/// `$1,234.56`. Absent values render as `$0.00`.
pub fn format_currency(value: Option<Decimal>) -> String {
    dollars(value.unwrap_or_default(), 2)
}

/// Like [`format_currency`] for raw text; anything non-numeric renders as
/// `$0.00`.
pub fn format_currency_str(raw: &str) -> String {
    let raw = raw.trim();
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok();
    format_currency(value)
}

/// Token price with enough precision for sub-dollar tokens.
///
/// `>= 1` uses two decimals, smaller prices up to six significant decimals,
/// and anything below `0.000001` collapses to `<$0.000001`.
pub fn format_price(value: Option<Decimal>) -> String {
    let value = value.unwrap_or_default();
    if value.is_zero() {
        return "$0.00".to_string();
    }
    if value.is_sign_negative() {
        return format!("-{}", format_price(Some(value.abs())));
    }
    if value >= Decimal::ONE {
        return dollars(value, 2);
    }
    if value < MIN_DISPLAY_PRICE {
        return format!("<${}", MIN_DISPLAY_PRICE);
    }

    let text = dollars(value, PRICE_DECIMALS);
    let trimmed = text.trim_end_matches('0');
    // Keep at least cents.
    let decimals = trimmed.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
    if decimals < 2 {
        format!("{}{}", trimmed, "0".repeat(2 - decimals))
    } else {
        trimmed.to_string()
    }
}

/// A fraction as a percentage: `0.1234` → `12.34%`. `None` → `n/a`.
pub fn format_percent(fraction: Option<Decimal>) -> String {
    match fraction.and_then(|f| f.checked_mul(dec!(100))) {
        Some(pct) => {
            let rounded = pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
            format!("{:.2}%", rounded)
        }
        None => "n/a".to_string(),
    }
}
