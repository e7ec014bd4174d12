//! Sortable, paginated tables for tokens and pairs

pub mod sort;
pub mod columns;
pub mod paginated;

pub use sort::*;
pub use columns::*;
pub use paginated::*;

use crate::types::{PairRecord, TokenAggregate};

pub type TokenTable = SortableTable<TokenAggregate>;
pub type PairTable = SortableTable<PairRecord>;
