//! SQLite data layer for the HomeShow organizer.
//!
//! This crate stores personnel, shows, genres and their relationships in a
//! fixed five-table SQLite schema and exchanges data with the presentation
//! layer purely as [`Row`](homeshow_core::Row)s and
//! [`Cell`](homeshow_core::Cell)s. No SQL crosses that boundary in either
//! direction except the literal statements handed back for display.
//!
//! # Architecture
//!
//! - **`schema`**: `CREATE TABLE` / `DROP TABLE` generation
//! - **`registry`**: the fixed join chain and key columns ([`HOMESHOW`])
//! - **`templates`**: insert and quick-search row templates
//! - **`statement`**: INSERT/DELETE/UPDATE/SELECT synthesis from rows and
//!   criteria, with a literal rendering of every bound statement
//! - **`materialize`**: conversion of query results back into rows
//! - **`store`**: the [`HomeShowStore`] façade that owns the connection
//! - **`config`**: YAML-loadable [`StoreConfig`]
//!
//! # Quick start
//!
//! ```no_run
//! use homeshow_core::Cell;
//! use homeshow_sqlite::{HomeShowStore, StoreConfig};
//!
//! let config = StoreConfig::load("homeshow.yml").unwrap();
//! let mut store = HomeShowStore::from_config(&config).unwrap();
//!
//! let criteria = vec![
//!     Cell::text("title", "show", ""),
//!     Cell::text("name", "genre", "Drama"),
//! ];
//! for row in store.get_data(&criteria, None).unwrap() {
//!     println!("{row}");
//! }
//! store.close().unwrap();
//! ```

mod config;
mod error;
mod materialize;
mod registry;
mod schema;
pub mod statement;
mod store;
mod templates;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use materialize::{Materializer, RawColumn, RawValue, SEARCH_RESULTS_TABLE};
pub use registry::{HOMESHOW, JoinLink, SchemaRegistry};
pub use schema::{create_schema, drop_schema, generate_drop_sql, generate_schema_sql};
pub use store::HomeShowStore;
pub use templates::{insert_templates, quick_search_templates};
