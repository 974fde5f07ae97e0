//! Error types for the HomeShow data layer.
//!
//! Provides a unified error type covering storage failures, statement
//! synthesis defects, result conversion failures and configuration loading.

use homeshow_core::CellError;
use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors that can occur while building, executing or materializing
/// statements.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A mutating statement violated a CHECK, PRIMARY KEY, FOREIGN KEY or
    /// NOT NULL constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The database could not be opened or a statement could not run.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] rusqlite::Error),

    /// The store was used after [`close`](crate::HomeShowStore::close).
    #[error("storage unavailable: connection is closed")]
    ConnectionClosed,

    /// No criteria were supplied for a search.
    #[error("no search criteria supplied")]
    EmptyCriteria,

    /// A result column could not be mapped to any cell kind.
    #[error("cannot map column '{column}': {reason}")]
    UnmappableColumn { column: String, reason: String },

    /// A table outside the fixed join chain was referenced.
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// A delete or update was requested without any key cells.
    #[error("no key cells supplied for table '{0}'")]
    NoKeyCells(String),

    /// An update was requested with no new values.
    #[error("no cells to update in table '{0}'")]
    EmptyRow(String),

    /// A row was inserted without a statement template.
    #[error("row for table '{0}' has no statement template")]
    MissingStatement(String),

    /// The number of placeholders and bind values disagree.
    #[error("statement has {placeholders} placeholder(s) but {values} value(s) were supplied")]
    ParameterMismatch { placeholders: usize, values: usize },

    /// A cell could not be built.
    #[error("cell error: {0}")]
    Cell(#[from] CellError),

    /// Configuration file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl StoreError {
    /// Returns `true` for errors caused by rejected data rather than a
    /// broken database or a defect.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref failure, ref message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                StoreError::ConstraintViolation(
                    message.clone().unwrap_or_else(|| failure.to_string()),
                )
            }
            other => StoreError::StorageUnavailable(other),
        }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
