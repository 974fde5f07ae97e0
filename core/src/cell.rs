//! A single named, typed field value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CellValue, PersonnelRole, SqlType, ValueKind};

/// Errors raised while building cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    /// The value does not match the cell's declared kind.
    #[error("value for '{column}' should be {expected} but was {found}")]
    KindMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// One field of a [`Row`](crate::Row): a column name, its owning table, a
/// typed value and two flags.
///
/// The value is either missing or a [`CellValue`] of the cell's
/// [`ValueKind`]; [`Cell::new`] and [`Cell::with_value`] enforce this.
/// Cells are immutable, so editing produces a new cell.
///
/// # Examples
///
/// ```
/// use homeshow_core::{Cell, CellValue, ValueKind};
///
/// let cell = Cell::text("last_name", "personnel", "Lovelace").with_key(true);
/// assert_eq!(cell.qualified_name(), "personnel.last_name");
/// assert!(cell.is_key());
/// assert!(!cell.is_empty());
///
/// // Mismatched values are rejected
/// assert!(Cell::new("year", "show", ValueKind::Integer, Some(CellValue::from("1999"))).is_err());
///
/// // Clearing restores the kind's sentinel
/// assert_eq!(cell.cleared().value(), Some(&CellValue::from("")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CellFields")]
pub struct Cell {
    column: String,
    table: String,
    kind: ValueKind,
    value: Option<CellValue>,
    is_key: bool,
    is_live_search: bool,
}

/// Unchecked mirror of [`Cell`] used to validate deserialized cells.
#[derive(Deserialize)]
struct CellFields {
    column: String,
    table: String,
    kind: ValueKind,
    value: Option<CellValue>,
    is_key: bool,
    is_live_search: bool,
}

impl TryFrom<CellFields> for Cell {
    type Error = CellError;

    fn try_from(fields: CellFields) -> Result<Self, Self::Error> {
        Ok(Cell::new(fields.column, fields.table, fields.kind, fields.value)?
            .with_key(fields.is_key)
            .with_live_search(fields.is_live_search))
    }
}

impl Cell {
    /// Creates a cell, checking that `value` matches `kind`.
    ///
    /// The new cell is neither a key nor live-searched; use
    /// [`with_key`](Self::with_key) and
    /// [`with_live_search`](Self::with_live_search) to set the flags.
    pub fn new(
        column: impl Into<String>,
        table: impl Into<String>,
        kind: ValueKind,
        value: Option<CellValue>,
    ) -> Result<Self, CellError> {
        let column = column.into();
        check_kind(&column, kind, value.as_ref())?;
        Ok(Self {
            column,
            table: table.into(),
            kind,
            value,
            is_key: false,
            is_live_search: false,
        })
    }

    /// Creates a cell holding its kind's "not filled in" value.
    pub fn empty(column: impl Into<String>, table: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            column: column.into(),
            table: table.into(),
            kind,
            value: kind.empty_value(),
            is_key: false,
            is_live_search: false,
        }
    }

    /// Creates a text cell.
    pub fn text(
        column: impl Into<String>,
        table: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::of(column, table, CellValue::Text(value.into()))
    }

    /// Creates an integer cell.
    pub fn integer(column: impl Into<String>, table: impl Into<String>, value: i64) -> Self {
        Self::of(column, table, CellValue::Integer(value))
    }

    /// Creates a boolean cell; `None` means "not filled in".
    pub fn boolean(
        column: impl Into<String>,
        table: impl Into<String>,
        value: Option<bool>,
    ) -> Self {
        Self {
            column: column.into(),
            table: table.into(),
            kind: ValueKind::Boolean,
            value: value.map(CellValue::Boolean),
            is_key: false,
            is_live_search: false,
        }
    }

    /// Creates a role cell.
    pub fn role(
        column: impl Into<String>,
        table: impl Into<String>,
        value: PersonnelRole,
    ) -> Self {
        Self::of(column, table, CellValue::Role(value))
    }

    fn of(column: impl Into<String>, table: impl Into<String>, value: CellValue) -> Self {
        Self {
            column: column.into(),
            table: table.into(),
            kind: value.kind(),
            value: Some(value),
            is_key: false,
            is_live_search: false,
        }
    }

    /// Sets whether the column is part of its table's primary key.
    pub fn with_key(mut self, is_key: bool) -> Self {
        self.is_key = is_key;
        self
    }

    /// Sets whether editing this cell triggers a live search.
    pub fn with_live_search(mut self, is_live_search: bool) -> Self {
        self.is_live_search = is_live_search;
        self
    }

    /// Returns a copy of this cell holding `value`.
    pub fn with_value(&self, value: Option<CellValue>) -> Result<Self, CellError> {
        check_kind(&self.column, self.kind, value.as_ref())?;
        Ok(Self {
            value,
            ..self.clone()
        })
    }

    /// Returns a copy of this cell reset to its kind's sentinel.
    pub fn cleared(&self) -> Self {
        Self {
            value: self.kind.empty_value(),
            ..self.clone()
        }
    }

    /// Returns a copy with surrounding whitespace removed from a text value.
    pub fn trimmed(&self) -> Self {
        match &self.value {
            Some(CellValue::Text(s)) if s.trim().len() != s.len() => Self {
                value: Some(CellValue::Text(s.trim().to_string())),
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn value(&self) -> Option<&CellValue> {
        self.value.as_ref()
    }

    /// Storage type used when this cell is bound as a parameter.
    pub fn sql_type(&self) -> SqlType {
        self.kind.sql_type()
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    pub fn is_live_search(&self) -> bool {
        self.is_live_search
    }

    /// Returns `true` if the value is missing or is its kind's sentinel.
    pub fn is_empty(&self) -> bool {
        self.value.as_ref().is_none_or(CellValue::is_empty)
    }

    /// Returns `table.column`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}"),
            None => Ok(()),
        }
    }
}

fn check_kind(column: &str, kind: ValueKind, value: Option<&CellValue>) -> Result<(), CellError> {
    match value {
        Some(v) if v.kind() != kind => Err(CellError::KindMismatch {
            column: column.to_string(),
            expected: kind,
            found: v.kind(),
        }),
        _ => Ok(()),
    }
}
