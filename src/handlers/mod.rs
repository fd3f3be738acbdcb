//! HTTP handlers for table data and the table listing.

pub mod table;
pub use table::*;
