//! Per-token aggregate types

use rust_decimal::Decimal;

/// Cumulative figures for one token across every pair containing it.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenAggregate {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub usd_price: Decimal,
    pub tvl: Decimal,
    pub volume: Decimal,
}
