//! The SQLite star schema: table definitions, the store owning the
//! connection and the per-table loader.

mod loader;
mod models;
mod schema;
mod store;

pub use loader::{LoadError, Loader};
pub use models::*;
pub use schema::WAREHOUSE_VERSIONED_SCHEMAS;
pub use store::SqliteWarehouse;
