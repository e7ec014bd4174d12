//! Column sets for the token and pair tables

use crate::{
    table::{SortColumn, SortValue, Sortable},
    types::{PairRecord, TokenAggregate},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenColumn {
    Name,
    Symbol,
    Price,
    Volume,
    Tvl,
}

impl SortColumn for TokenColumn {
    const ALL: &'static [Self] = &[
        TokenColumn::Name,
        TokenColumn::Symbol,
        TokenColumn::Price,
        TokenColumn::Volume,
        TokenColumn::Tvl,
    ];

    fn label(self) -> &'static str {
        match self {
            TokenColumn::Name => "Token",
            TokenColumn::Symbol => "Symbol",
            TokenColumn::Price => "Price",
            TokenColumn::Volume => "Volume (24hrs)",
            TokenColumn::Tvl => "TVL",
        }
    }

    fn key(self) -> &'static str {
        match self {
            TokenColumn::Name => "name",
            TokenColumn::Symbol => "symbol",
            TokenColumn::Price => "price",
            TokenColumn::Volume => "volume",
            TokenColumn::Tvl => "tvl",
        }
    }
}

impl Sortable for TokenAggregate {
    type Column = TokenColumn;

    fn sort_value(&self, column: TokenColumn) -> SortValue<'_> {
        match column {
            TokenColumn::Name => SortValue::Text(&self.name),
            TokenColumn::Symbol => SortValue::Text(&self.symbol),
            TokenColumn::Price => SortValue::Number(Some(self.usd_price)),
            TokenColumn::Volume => SortValue::Number(Some(self.volume)),
            TokenColumn::Tvl => SortValue::Number(Some(self.tvl)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairColumn {
    Name,
    Tvl,
    Volume,
    Fees,
    Apr,
}

impl SortColumn for PairColumn {
    const ALL: &'static [Self] = &[
        PairColumn::Name,
        PairColumn::Tvl,
        PairColumn::Volume,
        PairColumn::Fees,
        PairColumn::Apr,
    ];

    fn label(self) -> &'static str {
        match self {
            PairColumn::Name => "Pair",
            PairColumn::Tvl => "Liquidity",
            PairColumn::Volume => "Volume (24hrs)",
            PairColumn::Fees => "Fees (24hrs)",
            PairColumn::Apr => "Fee APR",
        }
    }

    fn key(self) -> &'static str {
        match self {
            PairColumn::Name => "name",
            PairColumn::Tvl => "tvl",
            PairColumn::Volume => "volume",
            PairColumn::Fees => "fees",
            PairColumn::Apr => "apr",
        }
    }
}

/// Pair names order by token0 symbol, then token1 symbol.
impl Sortable for PairRecord {
    type Column = PairColumn;

    fn sort_value(&self, column: PairColumn) -> SortValue<'_> {
        match column {
            PairColumn::Name => SortValue::TextPair(&self.token0.symbol, &self.token1.symbol),
            PairColumn::Tvl => SortValue::Number(Some(self.total_reserve_usd)),
            PairColumn::Volume => SortValue::Number(Some(self.total_volume_usd)),
            PairColumn::Fees => SortValue::Number(Some(self.lp_fees_24h_usd)),
            PairColumn::Apr => SortValue::Number(self.annualized_fee_apr),
        }
    }
}
