//! Conversion of raw query results into rows and cells.
//!
//! A query result is read into [`RawColumn`]s (name, owning table, raw
//! value) and turned into [`Row`]s by a [`Materializer`]. Every row and
//! cell produced is labeled with [`SEARCH_RESULTS_TABLE`].
//!
//! # Conversion rules
//!
//! - `NULL` values produce no cell.
//! - A column named `role` holds a [`PersonnelRole`] name (any case);
//!   the unset role is never stored and is rejected.
//! - Text that is not valid UTF-8 is rejected.
//! - A column named `is_movie` holds a boolean stored as an integer.
//! - Any other text or integer column keeps its type.
//! - Real and blob values cannot be represented and are rejected.
//!
//! A cell is a key when its owning table and column form a key in the
//! [`SchemaRegistry`]. Result cells never trigger live search.

use homeshow_core::{Cell, CellValue, PersonnelRole, Row, ValueKind};
use rusqlite::types::ValueRef;

use crate::error::{Result, StoreError};
use crate::registry::SchemaRegistry;

/// Table name given to every row and cell produced by a search.
pub const SEARCH_RESULTS_TABLE: &str = "Search_Results";

/// A raw value read from the database.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl TryFrom<ValueRef<'_>> for RawValue {
    type Error = std::str::Utf8Error;

    /// Copies a borrowed database value. Text that is not valid UTF-8 is
    /// rejected rather than repaired.
    fn try_from(value: ValueRef<'_>) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            ValueRef::Null => RawValue::Null,
            ValueRef::Integer(n) => RawValue::Integer(n),
            ValueRef::Real(f) => RawValue::Real(f),
            ValueRef::Text(bytes) => RawValue::Text(std::str::from_utf8(bytes)?.to_string()),
            ValueRef::Blob(bytes) => RawValue::Blob(bytes.to_vec()),
        })
    }
}

impl RawValue {
    fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Integer(_) => "integer",
            RawValue::Real(_) => "real",
            RawValue::Text(_) => "text",
            RawValue::Blob(_) => "blob",
        }
    }
}

/// One column of one result record.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    /// Column name as reported by the query.
    pub name: String,
    /// Table the column originates from; `None` for computed columns.
    pub table: Option<String>,
    pub value: RawValue,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, table: Option<&str>, value: RawValue) -> Self {
        Self {
            name: name.into(),
            table: table.map(String::from),
            value,
        }
    }
}

/// Turns raw result records into [`Row`]s.
#[derive(Debug, Clone)]
pub struct Materializer<'r> {
    registry: &'r SchemaRegistry,
    statement: String,
}

impl<'r> Materializer<'r> {
    /// Creates a materializer whose rows carry `statement`, the literal
    /// statement that produced the results.
    pub fn new(registry: &'r SchemaRegistry, statement: impl Into<String>) -> Self {
        Self {
            registry,
            statement: statement.into(),
        }
    }

    /// Lazily converts each record into a row.
    pub fn rows<I>(&self, records: I) -> impl Iterator<Item = Result<Row>> + '_
    where
        I: IntoIterator<Item = Vec<RawColumn>>,
        I::IntoIter: 'r,
    {
        records.into_iter().map(move |record| self.row(record))
    }

    /// Converts one record, skipping `NULL` columns.
    pub fn row(&self, record: Vec<RawColumn>) -> Result<Row> {
        let mut row = Row::new(SEARCH_RESULTS_TABLE, Some(&self.statement));
        for column in record {
            if let Some(cell) = self.cell(column)? {
                row.push(cell);
            }
        }
        Ok(row)
    }

    /// Converts one column, returning `None` for `NULL`.
    pub fn cell(&self, column: RawColumn) -> Result<Option<Cell>> {
        let is_key = column
            .table
            .as_deref()
            .is_some_and(|table| self.registry.is_key(table, &column.name));
        let unmappable = |reason: String| StoreError::UnmappableColumn {
            column: column.name.clone(),
            reason,
        };

        let value = match (column.name.as_str(), &column.value) {
            (_, RawValue::Null) => return Ok(None),
            ("role", RawValue::Text(s)) => match s.parse::<PersonnelRole>() {
                Ok(PersonnelRole::None) => {
                    return Err(unmappable(format!("'{s}' is not a stored role")));
                }
                Ok(role) => CellValue::Role(role),
                Err(e) => return Err(unmappable(e.to_string())),
            },
            ("is_movie", RawValue::Integer(n)) => CellValue::Boolean(*n > 0),
            ("role" | "is_movie", other) => {
                return Err(unmappable(format!("unexpected {} value", other.type_name())));
            }
            (_, RawValue::Text(s)) => CellValue::Text(s.clone()),
            (_, RawValue::Integer(n)) => CellValue::Integer(*n),
            (_, other) => {
                return Err(unmappable(format!(
                    "{} values have no matching cell kind",
                    other.type_name()
                )));
            }
        };

        let kind: ValueKind = value.kind();
        Ok(Some(
            Cell::new(&column.name, SEARCH_RESULTS_TABLE, kind, Some(value))?
                .with_key(is_key)
                .with_live_search(false),
        ))
    }
}
