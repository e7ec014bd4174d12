//! Error types shared by the fetch and aggregation layers

pub mod dashboard_error;

pub use dashboard_error::*;
