//! Data access façade over a single SQLite connection.
//!
//! [`HomeShowStore`] owns the connection and the row templates. Every
//! mutation returns the literal statement it executed so the caller can
//! show it; searches return [`Row`]s labeled
//! [`SEARCH_RESULTS_TABLE`](crate::SEARCH_RESULTS_TABLE).
//!
//! # Example
//!
//! ```
//! use homeshow_core::Cell;
//! use homeshow_sqlite::HomeShowStore;
//!
//! let store = HomeShowStore::open_in_memory().unwrap();
//!
//! let person = &store.insert_templates()[0];
//! let filled = homeshow_core::Row::with_cells(
//!     person.table(),
//!     person.statement(),
//!     vec![
//!         person.cells()[0].with_value(Some("Ada".into())).unwrap(),
//!         person.cells()[1].with_value(Some("Lovelace".into())).unwrap(),
//!     ],
//! );
//! store.insert_row(&filled).unwrap();
//!
//! let found = store
//!     .get_data(&[Cell::text("last_name", "personnel", "Love")], None)
//!     .unwrap();
//! assert_eq!(found.len(), 1);
//! ```

use std::path::Path;

use homeshow_core::{Cell, Row};
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::materialize::{Materializer, RawColumn, RawValue};
use crate::registry::HOMESHOW;
use crate::schema;
use crate::statement::{self, BoundStatement};
use crate::templates;

/// Owns the database connection and the row templates.
pub struct HomeShowStore {
    conn: Option<Connection>,
    insert_templates: Vec<Row>,
    quick_search_templates: Vec<Row>,
}

impl HomeShowStore {
    /// Opens (creating if needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] if the file cannot be
    /// opened or the schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening HomeShow database");
        Self::with_connection(Connection::open(path)?, &StoreConfig::default())
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        info!("Opening in-memory HomeShow database");
        Self::with_connection(Connection::open_in_memory()?, &StoreConfig::default())
    }

    /// Opens the database described by `config`.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let conn = if config.in_memory {
            info!("Opening in-memory HomeShow database");
            Connection::open_in_memory()?
        } else {
            info!(path = %config.database.display(), "Opening HomeShow database");
            Connection::open(&config.database)?
        };
        Self::with_connection(conn, config)
    }

    fn with_connection(conn: Connection, config: &StoreConfig) -> Result<Self> {
        conn.busy_timeout(config.busy_timeout())?;
        schema::create_schema(&conn)?;
        Ok(Self {
            conn: Some(conn),
            insert_templates: templates::insert_templates(),
            quick_search_templates: templates::quick_search_templates(),
        })
    }

    /// One insert template per table, in join-chain order.
    pub fn insert_templates(&self) -> &[Row] {
        &self.insert_templates
    }

    /// The canned quick-search templates.
    pub fn quick_search_templates(&self) -> &[Row] {
        &self.quick_search_templates
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(StoreError::ConnectionClosed)
    }

    /// Inserts `row` using its template statement and returns the literal
    /// statement executed.
    pub fn insert_row(&self, row: &Row) -> Result<String> {
        self.execute(statement::insert(row)?)
    }

    /// Deletes the record matching `row`'s key cells. Deleting a record
    /// that does not exist succeeds.
    pub fn delete_row(&self, row: &Row) -> Result<String> {
        self.execute(statement::delete(row)?)
    }

    /// Overwrites the record keyed by `old`'s key cells with `new`'s cells.
    pub fn update_row(&self, old: &Row, new: &Row) -> Result<String> {
        self.execute(statement::update(old, new)?)
    }

    fn execute(&self, bound: BoundStatement) -> Result<String> {
        let conn = self.conn()?;
        debug!(statement = bound.literal(), "Executing statement");
        match conn.execute(bound.sql(), params_from_iter(bound.params())) {
            Ok(changed) => {
                debug!(changed, "Statement executed");
                Ok(bound.literal().to_string())
            }
            Err(e) => {
                let err = StoreError::from(e);
                if err.is_constraint_violation() {
                    warn!(statement = bound.literal(), error = %err, "Statement rejected");
                }
                Err(err)
            }
        }
    }

    /// Searches the database.
    ///
    /// With no `statement` (or an empty one) the query is synthesized from
    /// `criteria`: empty cells choose the columns to return and non-empty
    /// cells filter. Otherwise `statement` is a canned search whose
    /// placeholders cycle through `criteria`.
    ///
    /// An empty `criteria` list returns no rows without querying.
    pub fn get_data(&self, criteria: &[Cell], statement: Option<&str>) -> Result<Vec<Row>> {
        if criteria.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.conn()?;
        let bound = match statement.filter(|s| !s.is_empty()) {
            Some(canned) => statement::canned_select(canned, criteria)?,
            None => statement::criteria_select(&HOMESHOW, criteria)?,
        };
        debug!(statement = bound.literal(), "Executing search");

        let mut stmt = conn.prepare(bound.sql())?;
        if stmt.parameter_count() != bound.params().len() {
            return Err(StoreError::ParameterMismatch {
                placeholders: stmt.parameter_count(),
                values: bound.params().len(),
            });
        }
        let columns: Vec<(String, Option<String>)> = stmt
            .columns_with_metadata()
            .iter()
            .map(|c| (c.name().to_string(), c.table_name().map(String::from)))
            .collect();

        let mut records = Vec::new();
        let mut rows = stmt.query(params_from_iter(bound.params()))?;
        while let Some(row) = rows.next()? {
            let record = columns
                .iter()
                .enumerate()
                .map(|(i, (name, table))| -> Result<RawColumn> {
                    let value = RawValue::try_from(row.get_ref(i)?).map_err(|e| {
                        StoreError::UnmappableColumn {
                            column: name.clone(),
                            reason: format!("invalid UTF-8: {e}"),
                        }
                    })?;
                    Ok(RawColumn::new(name.as_str(), table.as_deref(), value))
                })
                .collect::<Result<Vec<_>>>()?;
            records.push(record);
        }

        let results = Materializer::new(&HOMESHOW, bound.literal())
            .rows(records)
            .collect::<Result<Vec<_>>>()?;
        debug!(rows = results.len(), "Search returned");
        Ok(results)
    }

    /// Closes the connection. Calling it again does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] if SQLite refuses to close;
    /// the store is closed either way.
    pub fn close(&mut self) -> Result<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        info!("Closing HomeShow database");
        conn.close().map_err(|(_, e)| StoreError::StorageUnavailable(e))
    }
}

impl std::fmt::Debug for HomeShowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeShowStore")
            .field("open", &self.is_open())
            .field("insert_templates", &self.insert_templates.len())
            .field("quick_search_templates", &self.quick_search_templates.len())
            .finish()
    }
}
