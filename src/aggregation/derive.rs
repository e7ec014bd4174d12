//! Per-pair metric derivation

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::str::FromStr;
use crate::{
    errors::{DashboardError, DashboardResult},
    types::{PairRecord, RawPair, RawToken, TokenRef},
};

pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Decimal places kept on every USD value. Sums of values at one fixed scale
/// stay exact, so aggregation order cannot change the result.
pub const USD_SCALE: u32 = 12;

/// Parses a JSON number or numeric string into a `Decimal`.
///
/// Accepts plain and scientific notation (`"1.5"`, `1.5`, `"2e-7"`).
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn required_decimal(value: &Option<Value>, field: &str, pair: &str) -> DashboardResult<Decimal> {
    let value = value
        .as_ref()
        .filter(|v| !v.is_null())
        .ok_or_else(|| DashboardError::malformed(pair, format!("missing {}", field)))?;
    let parsed = parse_decimal(value)
        .ok_or_else(|| DashboardError::malformed(pair, format!("{} is not numeric: {}", field, value)))?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(DashboardError::malformed(pair, format!("{} is negative: {}", field, parsed)));
    }
    Ok(parsed)
}

fn fee_rate(value: &Option<Value>, field: &str, pair: &str) -> DashboardResult<Decimal> {
    let rate = required_decimal(value, field, pair)?;
    if rate > dec!(100) {
        return Err(DashboardError::malformed(pair, format!("{} above 100%: {}", field, rate)));
    }
    Ok(rate)
}

fn token_ref(
    token: &Option<RawToken>,
    side: &str,
    price_multiplier: Decimal,
    pair: &str,
) -> DashboardResult<TokenRef> {
    let token = token
        .as_ref()
        .ok_or_else(|| DashboardError::malformed(pair, format!("missing {}", side)))?;
    let address = token
        .contract_address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| DashboardError::malformed(pair, format!("missing contractAddress on {}", side)))?
        .to_ascii_lowercase();
    let quoted = required_decimal(&token.usd_price, &format!("usdPrice on {}", side), pair)?;
    let usd_price = quoted
        .checked_mul(price_multiplier)
        .ok_or_else(|| DashboardError::malformed(pair, format!("usdPrice on {} overflows", side)))?;

    Ok(TokenRef {
        symbol: token.symbol.clone().unwrap_or_else(|| address.clone()),
        name: token
            .name
            .clone()
            .or_else(|| token.symbol.clone())
            .unwrap_or_else(|| address.clone()),
        address,
        usd_price,
    })
}

fn usd(amount: Decimal, price: Decimal, what: &str, pair: &str) -> DashboardResult<Decimal> {
    amount
        .checked_mul(price)
        .map(|value| value.round_dp(USD_SCALE))
        .ok_or_else(|| DashboardError::malformed(pair, format!("{} overflows in USD", what)))
}

/// Turns a raw API pair into a `PairRecord` with USD reserve, USD volume,
/// daily LP fees and annualized fee APR.
///
/// `price_multiplier` converts quoted token prices to USD (1 when the API
/// already quotes USD). A pair holding no USD value gets `None` for APR.
pub fn derive_pair(raw: &RawPair, price_multiplier: Decimal) -> DashboardResult<PairRecord> {
    let pair = raw.label();

    let token0 = token_ref(&raw.token0, "token0", price_multiplier, &pair)?;
    let token1 = token_ref(&raw.token1, "token1", price_multiplier, &pair)?;
    let reserve0 = required_decimal(&raw.token0_reserve, "token0Reserve", &pair)?;
    let reserve1 = required_decimal(&raw.token1_reserve, "token1Reserve", &pair)?;
    let volume0 = required_decimal(&raw.token0_volume, "token0Volume", &pair)?;
    let volume1 = required_decimal(&raw.token1_volume, "token1Volume", &pair)?;
    let swap_fee = fee_rate(&raw.swap_fee, "swapFee", &pair)?;
    let platform_fee = fee_rate(&raw.platform_fee, "platformFee", &pair)?;

    let reserve0_usd = usd(reserve0, token0.usd_price, "token0Reserve", &pair)?;
    let reserve1_usd = usd(reserve1, token1.usd_price, "token1Reserve", &pair)?;
    let volume0_usd = usd(volume0, token0.usd_price, "token0Volume", &pair)?;
    let volume1_usd = usd(volume1, token1.usd_price, "token1Volume", &pair)?;
    let total_reserve_usd = reserve0_usd
        .checked_add(reserve1_usd)
        .ok_or_else(|| DashboardError::malformed(&pair, "total reserve overflows"))?;
    // Pair volume is counted on the token0 side only; both sides describe
    // the same trades.
    let total_volume_usd = volume0_usd;

    let lp_take_home = (swap_fee / dec!(100)) * (Decimal::ONE - platform_fee / dec!(100));
    let lp_fees_24h_usd = total_volume_usd
        .checked_mul(lp_take_home)
        .map(|fees| fees.round_dp(USD_SCALE))
        .ok_or_else(|| DashboardError::malformed(&pair, "daily fees overflow"))?;
    let annualized_fee_apr = annualized_apr(lp_fees_24h_usd, total_reserve_usd);

    Ok(PairRecord {
        address: raw.address.as_ref().map(|a| a.to_ascii_lowercase()),
        token0,
        token1,
        reserve0,
        reserve1,
        volume0,
        volume1,
        swap_fee,
        platform_fee,
        reserve0_usd,
        reserve1_usd,
        volume0_usd,
        volume1_usd,
        total_reserve_usd,
        total_volume_usd,
        lp_fees_24h_usd,
        annualized_fee_apr,
    })
}

/// Extrapolates one day of LP fees to a yearly return on `reserve_usd`.
pub fn annualized_apr(daily_fees_usd: Decimal, reserve_usd: Decimal) -> Option<Decimal> {
    if reserve_usd <= Decimal::ZERO {
        return None;
    }
    daily_fees_usd
        .checked_mul(DAYS_PER_YEAR)?
        .checked_div(reserve_usd)
}
