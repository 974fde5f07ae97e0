//! Ordered collections of cells.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// An ordered set of [`Cell`]s belonging to one table, plus the statement
/// text associated with the row's purpose.
///
/// Cell order is significant: it is the column and parameter order used
/// whenever SQL is synthesized from the row. For templates the statement
/// is a parameterized SQL template; for search results it is the literal
/// statement that produced the row.
///
/// # Examples
///
/// ```
/// use homeshow_core::{Cell, Row};
///
/// let row = Row::with_cells(
///     "personnel",
///     Some("INSERT INTO personnel (first_name, last_name) VALUES (?, ?);"),
///     vec![
///         Cell::text("first_name", "personnel", "Ada").with_key(true),
///         Cell::text("last_name", "personnel", "Lovelace").with_key(true),
///     ],
/// );
/// assert_eq!(row.key_cells().count(), 2);
/// assert_eq!(row.cell("last_name").unwrap().to_string(), "Lovelace");
/// assert!(row.cleared().cells().iter().all(Cell::is_empty));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    table: String,
    statement: Option<String>,
    cells: Vec<Cell>,
}

impl Row {
    /// Creates an empty row.
    pub fn new(table: impl Into<String>, statement: Option<&str>) -> Self {
        Self {
            table: table.into(),
            statement: statement.map(String::from),
            cells: Vec::new(),
        }
    }

    /// Creates a row holding `cells` in the given order.
    pub fn with_cells(table: impl Into<String>, statement: Option<&str>, cells: Vec<Cell>) -> Self {
        Self {
            table: table.into(),
            statement: statement.map(String::from),
            cells,
        }
    }

    /// Appends a cell.
    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Replaces the associated statement.
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the associated statement, treating an empty string as absent.
    pub fn statement(&self) -> Option<&str> {
        self.statement.as_deref().filter(|s| !s.is_empty())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Finds the first cell for `column`.
    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.column() == column)
    }

    /// Returns the key cells in declared order.
    pub fn key_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_key())
    }

    /// Returns a copy with only the key cells.
    pub fn keys_only(&self) -> Self {
        Self {
            table: self.table.clone(),
            statement: self.statement.clone(),
            cells: self.key_cells().cloned().collect(),
        }
    }

    /// Returns a copy with every cell reset to its kind's sentinel.
    pub fn cleared(&self) -> Self {
        Self {
            table: self.table.clone(),
            statement: self.statement.clone(),
            cells: self.cells.iter().map(Cell::cleared).collect(),
        }
    }

    /// Returns a copy with whitespace trimmed from every text cell.
    pub fn trimmed(&self) -> Self {
        Self {
            table: self.table.clone(),
            statement: self.statement.clone(),
            cells: self.cells.iter().map(Cell::trimmed).collect(),
        }
    }

    /// Serializes the row as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{cell}")?;
        }
        f.write_str("]")
    }
}
