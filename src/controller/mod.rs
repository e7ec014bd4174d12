//! Page controller, view state and user commands

pub mod state;
pub mod commands;
pub mod page;

pub use state::*;
pub use commands::*;
pub use page::*;
