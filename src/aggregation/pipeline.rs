//! Full derivation pass over one fetch cycle's raw pairs

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use crate::{
    aggregation::{accumulate_pair, add_pair, derive_pair},
    errors::DashboardError,
    types::{PairRecord, RawPair, TokenAggregate, Totals},
};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub pairs: Vec<PairRecord>,
    /// One entry per token address, ordered by address.
    pub tokens: Vec<TokenAggregate>,
    pub totals: Totals,
    /// Records rejected as malformed or overflowing.
    pub skipped: usize,
}

/// Derives every pair and folds the survivors into token aggregates and
/// totals. A pair is skipped when it is malformed or when adding it would
/// overflow any sum; skipped pairs contribute nothing anywhere.
pub fn run_pipeline(raw_pairs: &[RawPair], price_multiplier: Decimal) -> PipelineOutput {
    let mut pairs = Vec::with_capacity(raw_pairs.len());
    let mut tokens = BTreeMap::new();
    let mut totals = Totals::default();
    let mut skipped = 0;

    for raw in raw_pairs {
        let accepted = derive_pair(raw, price_multiplier).and_then(|pair| {
            let next = add_pair(&totals, &pair).ok_or_else(|| {
                DashboardError::malformed(pair.label(), "global totals overflow")
            })?;
            accumulate_pair(&mut tokens, &pair)?;
            Ok((pair, next))
        });

        match accepted {
            Ok((pair, next)) => {
                totals = next;
                pairs.push(pair);
            }
            Err(e) => {
                skipped += 1;
                warn!("⚠️ Skipping pair: {}", e);
            }
        }
    }

    let tokens: Vec<TokenAggregate> = tokens.into_values().collect();

    debug!(
        pairs = pairs.len(),
        tokens = tokens.len(),
        skipped,
        tvl = %totals.tvl,
        "Aggregation complete"
    );

    PipelineOutput {
        pairs,
        tokens,
        totals,
        skipped,
    }
}
