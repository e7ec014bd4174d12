//! Reference-asset price oracle

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};
use crate::{
    aggregation::parse_decimal,
    errors::{DashboardError, DashboardResult},
    network::retry::{retry_with_backoff, RetryConfig},
};

#[async_trait]
pub trait PriceOracle: Send + Sync {
    fn name(&self) -> &'static str;
    /// USD price of the reference asset.
    async fn fetch_reference_price(&self) -> DashboardResult<Decimal>;
}

/// Reads a strictly positive price at `pointer` (RFC 6901, e.g. `/price` or
/// `/vechain/usd`). Numbers and numeric strings are accepted.
pub fn extract_price(body: &Value, pointer: &str) -> DashboardResult<Decimal> {
    let raw = body.pointer(pointer).ok_or_else(|| DashboardError::PriceUnavailable {
        reason: format!("no value at {}", pointer),
    })?;
    let price = parse_decimal(raw).ok_or_else(|| DashboardError::PriceUnavailable {
        reason: format!("value at {} is not numeric: {}", pointer, raw),
    })?;
    if price <= Decimal::ZERO {
        return Err(DashboardError::PriceUnavailable {
            reason: format!("non-positive price {}", price),
        });
    }
    Ok(price)
}

pub struct HttpPriceOracle {
    client: Client,
    url: String,
    pointer: String,
    retry: RetryConfig,
}

impl HttpPriceOracle {
    pub fn new(url: &str, pointer: &str, retry: RetryConfig) -> DashboardResult<Self> {
        let client = Client::builder()
            .timeout(retry.attempt_timeout)
            .build()
            .map_err(|e| DashboardError::Network {
                message: "Failed to build HTTP client".to_string(),
                source: Some(e.into()),
                retry_count: 0,
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
            pointer: pointer.to_string(),
            retry,
        })
    }
}

#[async_trait]
impl PriceOracle for HttpPriceOracle {
    fn name(&self) -> &'static str {
        "price-oracle"
    }

    async fn fetch_reference_price(&self) -> DashboardResult<Decimal> {
        let client = &self.client;
        let url = self.url.as_str();
        let operation = move || async move {
            let response = client
                .get(url)
                .send()
                .await
                .context("HTTP request failed")?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!("⚠️ Price oracle returned error status {}: {}", status, body);
                return Err(anyhow::anyhow!("Price oracle error: {} - {}", status, body));
            }

            let json: Value = response.json().await.map_err(|e| DashboardError::DataParsing {
                context: "price oracle response body".to_string(),
                source: e.into(),
            })?;
            Ok(json)
        };

        let body = retry_with_backoff(operation, &self.retry, "reference price fetch").await?;
        let price = extract_price(&body, &self.pointer)?;
        debug!("Reference price from {}: {}", self.url, price);
        Ok(price)
    }
}
