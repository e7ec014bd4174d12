//! Pairs API client

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use crate::{
    errors::{DashboardError, DashboardResult},
    network::retry::{retry_with_backoff, RetryConfig},
    types::RawPair,
};

/// Raw pairs from one response. Records that could not even be read as a
/// pair object are counted rather than failing the whole response.
#[derive(Debug, Clone, Default)]
pub struct PairsPayload {
    pub pairs: Vec<RawPair>,
    pub unreadable: usize,
}

#[async_trait]
pub trait PairsSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch_pairs(&self) -> DashboardResult<PairsPayload>;
}

/// Accepts either an object keyed by pair address or a plain array.
pub fn parse_pairs_payload(body: Value) -> DashboardResult<PairsPayload> {
    let entries: Vec<(Option<String>, Value)> = match body {
        Value::Object(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
        Value::Array(items) => items.into_iter().map(|v| (None, v)).collect(),
        other => {
            return Err(DashboardError::DataParsing {
                context: "pairs response is neither an object nor an array".to_string(),
                source: anyhow::anyhow!("unexpected JSON: {}", truncate_json(&other)),
            });
        }
    };

    let mut payload = PairsPayload::default();
    for (key, value) in entries {
        match serde_json::from_value::<RawPair>(value) {
            Ok(mut pair) => {
                if pair.address.is_none() {
                    pair.address = key;
                }
                payload.pairs.push(pair);
            }
            Err(e) => {
                payload.unreadable += 1;
                warn!("⚠️ Unreadable pair record {}: {}", key.as_deref().unwrap_or("<unkeyed>"), e);
            }
        }
    }
    Ok(payload)
}

fn truncate_json(value: &Value) -> String {
    let text = value.to_string();
    if text.len() > 80 {
        let cut = (0..=80).rev().find(|i| text.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &text[..cut])
    } else {
        text
    }
}

/// Joins a base URL and a resource path with exactly one slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub struct HttpPairsClient {
    client: Client,
    url: String,
    retry: RetryConfig,
}

impl HttpPairsClient {
    pub fn new(base_url: &str, retry: RetryConfig) -> DashboardResult<Self> {
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
            url: endpoint(base_url, "pairs"),
            retry,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PairsSource for HttpPairsClient {
    fn name(&self) -> &'static str {
        "pairs-api"
    }

    async fn fetch_pairs(&self) -> DashboardResult<PairsPayload> {
        let client = &self.client;
        let url = self.url.as_str();
        let operation = move || async move {
            let response = client
                .get(url)
                .header("Accept", "application/json")
                .send()
                .await
                .context("HTTP request failed")?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!("⚠️ Pairs API returned error status {}: {}", status, body);
                return Err(anyhow::anyhow!("Pairs API error: {} - {}", status, body));
            }

            let body: Value = response.json().await.map_err(|e| DashboardError::DataParsing {
                context: "pairs response body".to_string(),
                source: e.into(),
            })?;

            Ok(parse_pairs_payload(body)?)
        };

        let payload = retry_with_backoff(operation, &self.retry, "pairs fetch").await?;
        debug!(
            pairs = payload.pairs.len(),
            unreadable = payload.unreadable,
            "Fetched pairs from {}",
            self.url
        );
        Ok(payload)
    }
}
