//! Folding pairs into per-token aggregates

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::warn;
use crate::{
    errors::{DashboardError, DashboardResult},
    types::{PairRecord, TokenAggregate, TokenRef},
};

fn fresh(token: &TokenRef) -> TokenAggregate {
    TokenAggregate {
        address: token.address.clone(),
        symbol: token.symbol.clone(),
        name: token.name.clone(),
        usd_price: token.usd_price,
        tvl: Decimal::ZERO,
        volume: Decimal::ZERO,
    }
}

fn add_side(
    entry: &mut TokenAggregate,
    token: &TokenRef,
    reserve_usd: Decimal,
    volume_usd: Decimal,
    pair: &PairRecord,
) -> DashboardResult<()> {
    let overflow = |what: &str| {
        DashboardError::malformed(pair.label(), format!("{} {} overflows", token.symbol, what))
    };
    entry.tvl = entry.tvl.checked_add(reserve_usd).ok_or_else(|| overflow("TVL"))?;
    entry.volume = entry.volume.checked_add(volume_usd).ok_or_else(|| overflow("volume"))?;
    // Latest pair wins for metadata.
    entry.symbol.clone_from(&token.symbol);
    entry.name.clone_from(&token.name);
    entry.usd_price = token.usd_price;
    Ok(())
}

/// Adds both sides of `pair` to the running aggregates. When either token's
/// sum would overflow, `tokens` is left exactly as it was.
pub fn accumulate_pair(
    tokens: &mut BTreeMap<String, TokenAggregate>,
    pair: &PairRecord,
) -> DashboardResult<()> {
    let mut side0 = tokens
        .get(&pair.token0.address)
        .cloned()
        .unwrap_or_else(|| fresh(&pair.token0));
    add_side(&mut side0, &pair.token0, pair.reserve0_usd, pair.volume0_usd, pair)?;

    if pair.token1.address == pair.token0.address {
        add_side(&mut side0, &pair.token1, pair.reserve1_usd, pair.volume1_usd, pair)?;
        tokens.insert(side0.address.clone(), side0);
        return Ok(());
    }

    let mut side1 = tokens
        .get(&pair.token1.address)
        .cloned()
        .unwrap_or_else(|| fresh(&pair.token1));
    add_side(&mut side1, &pair.token1, pair.reserve1_usd, pair.volume1_usd, pair)?;

    tokens.insert(side0.address.clone(), side0);
    tokens.insert(side1.address.clone(), side1);
    Ok(())
}

/// Builds one aggregate per token address, summing the USD reserve and USD
/// volume each pair contributes on that token's side. A pair that would
/// overflow a token's sums is left out.
pub fn aggregate_tokens(pairs: &[PairRecord]) -> BTreeMap<String, TokenAggregate> {
    let mut tokens = BTreeMap::new();

    for pair in pairs {
        if let Err(e) = accumulate_pair(&mut tokens, pair) {
            warn!("⚠️ Leaving pair out of token sums: {}", e);
        }
    }

    tokens
}
