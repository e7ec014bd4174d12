//! Pair-related types: the wire shape from the pairs API and the derived record

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Token sub-object as delivered by the pairs endpoint.
///
/// Every field is optional so that a single bad record never fails the
/// whole response; missing values are rejected later during derivation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawToken {
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub usd_price: Option<Value>,
}

/// Pair object as delivered by the pairs endpoint. Numeric fields may be
/// JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPair {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub token0: Option<RawToken>,
    #[serde(default)]
    pub token1: Option<RawToken>,
    #[serde(default)]
    pub token0_reserve: Option<Value>,
    #[serde(default)]
    pub token1_reserve: Option<Value>,
    #[serde(default)]
    pub token0_volume: Option<Value>,
    #[serde(default)]
    pub token1_volume: Option<Value>,
    #[serde(default)]
    pub swap_fee: Option<Value>,
    #[serde(default)]
    pub platform_fee: Option<Value>,
}

impl RawPair {
    /// Human-readable identifier for diagnostics, best effort.
    pub fn label(&self) -> String {
        let symbol = |t: &Option<RawToken>| {
            t.as_ref()
                .and_then(|t| t.symbol.clone())
                .unwrap_or_else(|| "?".to_string())
        };
        match &self.address {
            Some(address) => format!("{}-{} ({})", symbol(&self.token0), symbol(&self.token1), address),
            None => format!("{}-{}", symbol(&self.token0), symbol(&self.token1)),
        }
    }
}

/// Token reference carried by a derived pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRef {
    /// Lower-cased contract address.
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub usd_price: Decimal,
}

/// One trading pair with its derived USD metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRecord {
    pub address: Option<String>,
    pub token0: TokenRef,
    pub token1: TokenRef,
    pub reserve0: Decimal,
    pub reserve1: Decimal,
    pub volume0: Decimal,
    pub volume1: Decimal,
    /// Percent, e.g. `0.3` for 0.3%.
    pub swap_fee: Decimal,
    /// Percent of the swap fee kept by the platform.
    pub platform_fee: Decimal,
    pub reserve0_usd: Decimal,
    pub reserve1_usd: Decimal,
    pub volume0_usd: Decimal,
    pub volume1_usd: Decimal,
    pub total_reserve_usd: Decimal,
    pub total_volume_usd: Decimal,
    pub lp_fees_24h_usd: Decimal,
    /// Fraction (0.12 == 12%). `None` when the pair holds no USD value.
    pub annualized_fee_apr: Option<Decimal>,
}

impl PairRecord {
    pub fn label(&self) -> String {
        format!("{}-{}", self.token0.symbol, self.token1.symbol)
    }
}

