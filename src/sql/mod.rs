//! Safe SQL builder: identifiers from the table registry only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
