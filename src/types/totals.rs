//! Global dashboard totals

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub tvl: Decimal,
    pub volume: Decimal,
}
