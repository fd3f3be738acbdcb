//! Table viewer backend: paginated, filtered, sorted table data from MySQL over HTTP.
//!
//! Only tables and columns listed in the table registry are ever named in SQL;
//! every filter literal and LIMIT/OFFSET value is bound as a parameter.

pub mod column;
pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod paging;
pub mod request;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{from_json_str, load_from_path, resolve, ResolvedTable, Settings, TableRegistry, TablesConfig};
pub use error::{AppError, ConfigError, FilterError};
pub use request::TableRequest;
pub use response::TableData;
pub use routes::{app, common_routes_with_ready, table_routes};
pub use service::TableService;
pub use state::AppState;
pub use store::{MySqlStore, TableStore};
