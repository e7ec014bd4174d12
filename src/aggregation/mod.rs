//! Pair derivation, token aggregation and totals

pub mod derive;
pub mod tokens;
pub mod totals;
pub mod pipeline;

pub use derive::*;
pub use tokens::*;
pub use totals::*;
pub use pipeline::*;
