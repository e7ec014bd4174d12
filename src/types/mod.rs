//! Core data types and structures

pub mod pairs;
pub mod tokens;
pub mod totals;
pub mod dataset;

pub use pairs::*;
pub use tokens::*;
pub use totals::*;
pub use dataset::*;
