//! Custom error types for the dashboard

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        retry_count: u32,
    },

    #[error("Request timed out: {context} after {after:?}")]
    Timeout {
        context: String,
        after: Duration,
    },

    #[error("Data parsing error: {context}")]
    DataParsing {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Malformed pair record {pair}: {reason}")]
    MalformedRecord {
        pair: String,
        reason: String,
    },

    #[error("Reference price unavailable: {reason}")]
    PriceUnavailable {
        reason: String,
    },

    #[error("Invalid configuration: {message}")]
    Configuration {
        message: String,
    },
}

impl DashboardError {
    pub fn malformed(pair: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            pair: pair.into(),
            reason: reason.into(),
        }
    }

    /// Short label used when counting failures in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::Network { .. } => "network",
            DashboardError::Timeout { .. } => "timeout",
            DashboardError::DataParsing { .. } => "parse_error",
            DashboardError::MalformedRecord { .. } => "malformed_record",
            DashboardError::PriceUnavailable { .. } => "price_unavailable",
            DashboardError::Configuration { .. } => "configuration",
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_record_message_names_the_pair() {
        let err = DashboardError::malformed("VET-WVET", "missing usdPrice on token1");
        assert_eq!(
            err.to_string(),
            "Malformed pair record VET-WVET: missing usdPrice on token1"
        );
        assert_eq!(err.kind(), "malformed_record");
    }

    #[test]
    fn network_error_exposes_its_source() {
        use std::error::Error;

        let err = DashboardError::Network {
            message: "pairs fetch failed after 3 attempts".to_string(),
            source: Some(anyhow::anyhow!("connection refused")),
            retry_count: 3,
        };
        assert!(err.source().is_some());
        assert_eq!(err.kind(), "network");
    }
}
