//! TableService: paged table reads using the safe SQL builder.

mod table;
mod validation;
pub use table::TableService;
pub use validation::RequestValidator;
