//! Dashboard configuration settings and environment variable handling

use std::env;
use std::time::Duration;

// Configuration constants
pub const DEFAULT_API_BASE_URL: &str = "https://api.vexchange.io/v1/";
pub const DEFAULT_ORACLE_POINTER: &str = "/price";

// Table Constants
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MIN_PAGE_SIZE: usize = 1;
pub const MAX_PAGE_SIZE: usize = 100;

// Fetch Constants
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_FETCH_MAX_ATTEMPTS: u32 = 3;
pub const MAX_FETCH_ATTEMPTS: u32 = 10;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 10;

// Display Constants
pub const DEFAULT_DISPLAY_WIDTH: usize = 120;
pub const MIN_DISPLAY_WIDTH: usize = 40;
pub const MAX_DISPLAY_WIDTH: usize = 400;

/// Unit the pairs API quotes token prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDenomination {
    /// `usdPrice` is already in USD.
    Usd,
    /// `usdPrice` is quoted in the reference asset and must be multiplied by
    /// the oracle price.
    Reference,
}

impl PriceDenomination {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "usd" => Some(Self::Usd),
            "reference" | "ref" => Some(Self::Reference),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    // Price Oracle Configuration
    pub price_oracle_url: Option<String>,
    pub price_oracle_pointer: String,
    pub price_denomination: PriceDenomination,
    // Allow-list (lower-cased addresses, empty allows every token)
    pub allowed_tokens: Vec<String>,
    // Table Configuration
    pub page_size: usize,
    // Fetch Configuration
    pub fetch_timeout_secs: u64,
    pub fetch_max_attempts: u32,
    /// Zero disables periodic refresh.
    pub refresh_interval_secs: u64,
    // Display Configuration
    pub display_width: usize,
}

impl Config {
    pub fn load() -> Self {
        Self {
            api_base_url: env::var("API_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            price_oracle_url: env::var("PRICE_ORACLE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            price_oracle_pointer: env::var("PRICE_ORACLE_POINTER")
                .unwrap_or_else(|_| DEFAULT_ORACLE_POINTER.to_string()),
            price_denomination: env::var("PRICE_DENOMINATION")
                .ok()
                .and_then(|s| PriceDenomination::parse(&s))
                .unwrap_or(PriceDenomination::Usd),
            allowed_tokens: parse_address_list(
                &env::var("ALLOWED_TOKENS").unwrap_or_default(),
            ),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
                .clamp(1, MAX_FETCH_TIMEOUT_SECS),
            fetch_max_attempts: env::var("FETCH_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_FETCH_MAX_ATTEMPTS)
                .clamp(1, MAX_FETCH_ATTEMPTS),
            refresh_interval_secs: env::var("REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(normalize_refresh_interval)
                .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS),
            display_width: env::var("DISPLAY_WIDTH")
                .or_else(|_| env::var("COLUMNS"))
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_DISPLAY_WIDTH)
                .clamp(MIN_DISPLAY_WIDTH, MAX_DISPLAY_WIDTH),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            price_oracle_url: None,
            price_oracle_pointer: DEFAULT_ORACLE_POINTER.to_string(),
            price_denomination: PriceDenomination::Usd,
            allowed_tokens: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            fetch_max_attempts: DEFAULT_FETCH_MAX_ATTEMPTS,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

/// Splits a comma or whitespace separated address list, lower-casing entries.
pub fn parse_address_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

fn normalize_refresh_interval(secs: u64) -> u64 {
    if secs == 0 {
        0
    } else {
        secs.max(MIN_REFRESH_INTERVAL_SECS)
    }
}
