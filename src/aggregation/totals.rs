//! Global TVL and volume totals

use crate::types::{PairRecord, Totals};

/// Adds one pair to `totals`, or `None` when either sum would overflow.
pub fn add_pair(totals: &Totals, pair: &PairRecord) -> Option<Totals> {
    Some(Totals {
        tvl: totals.tvl.checked_add(pair.total_reserve_usd)?,
        volume: totals.volume.checked_add(pair.total_volume_usd)?,
    })
}

/// Sums every pair's USD reserve and USD volume. A pair that would push either
/// sum past `Decimal::MAX` is left out rather than clamped.
pub fn sum_totals(pairs: &[PairRecord]) -> Totals {
    pairs
        .iter()
        .fold(Totals::default(), |acc, pair| add_pair(&acc, pair).unwrap_or(acc))
}
