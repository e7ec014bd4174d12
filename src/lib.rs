//! DEX Dashboard - liquidity and volume analytics for an AMM exchange
//!
//! Fetches raw pair data from the exchange API, derives USD metrics per pair,
//! aggregates them per token and renders sortable, paginated tables for a
//! terminal of any width.

pub mod config;
pub mod types;
pub mod errors;
pub mod aggregation;
pub mod table;
pub mod network;
pub mod controller;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{DashboardError, DashboardResult};
pub use types::*;
