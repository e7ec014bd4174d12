//! HTTP clients, retry policy and the token allow-list

pub mod retry;
pub mod api;
pub mod oracle;
pub mod allow_list;

pub use retry::*;
pub use api::*;
pub use oracle::*;
pub use allow_list::*;
