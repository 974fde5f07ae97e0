//! Statement synthesis from rows and search criteria.
//!
//! Every function here returns a [`BoundStatement`]: the parameterized SQL,
//! its positional bind values, and the literal statement with each value
//! written in place of its placeholder. All three are produced together by
//! a [`StatementBuilder`], so the literal always shows exactly what was
//! bound.
//!
//! # Search criteria
//!
//! A criteria cell that is empty (see [`Cell::is_empty`]) names a column to
//! select; a non-empty one becomes a filter. Text-typed filters match with
//! `LIKE` and are bound wrapped in `%` wildcards; all others match with `=`.
//!
//! # Example
//!
//! ```
//! use homeshow_core::Cell;
//! use homeshow_sqlite::statement;
//! use homeshow_sqlite::HOMESHOW;
//!
//! let criteria = vec![
//!     Cell::text("title", "show", "Matrix"),
//!     Cell::text("name", "genre", ""),
//! ];
//! let bound = statement::criteria_select(&HOMESHOW, &criteria).unwrap();
//! assert_eq!(
//!     bound.sql(),
//!     "SELECT DISTINCT genre.name FROM show \
//!      JOIN hasgenre ON hasgenre.show_title=show.title AND hasgenre.show_year=show.year \
//!      JOIN genre ON genre.name=hasgenre.genre_name \
//!      WHERE show.title LIKE ?;"
//! );
//! assert!(bound.literal().ends_with("WHERE show.title LIKE '%Matrix%';"));
//! ```

use homeshow_core::{Cell, CellValue, Row, SqlType};
use rusqlite::types::{ToSql, ToSqlOutput, Value};

use crate::error::{Result, StoreError};
use crate::registry::SchemaRegistry;

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    /// SQL `NULL`.
    Null,
    /// Integer, also used for booleans (`0`/`1`).
    Integer(i64),
    /// Text.
    Text(String),
}

impl SqlParam {
    /// Converts a cell's value for binding. With `wildcard` set, text-typed
    /// values are wrapped in `%` for `LIKE` matching.
    pub fn from_cell(cell: &Cell, wildcard: bool) -> Self {
        let text = |s: &str| {
            if wildcard {
                SqlParam::Text(format!("%{s}%"))
            } else {
                SqlParam::Text(s.to_string())
            }
        };
        match cell.value() {
            None => SqlParam::Null,
            Some(CellValue::Text(s)) => text(s),
            Some(CellValue::Role(role)) => text(role.as_str()),
            Some(CellValue::Integer(n)) => SqlParam::Integer(*n),
            Some(CellValue::Boolean(b)) => SqlParam::Integer(i64::from(*b)),
        }
    }

    /// Writes the value as an SQL literal.
    pub fn literal(&self) -> String {
        match self {
            SqlParam::Null => "NULL".to_string(),
            SqlParam::Integer(n) => n.to_string(),
            SqlParam::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlParam::Null => ToSqlOutput::Owned(Value::Null),
            SqlParam::Integer(n) => ToSqlOutput::from(*n),
            SqlParam::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

/// A statement ready for execution, with its literal rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundStatement {
    sql: String,
    params: Vec<SqlParam>,
    literal: String,
}

impl BoundStatement {
    /// Parameterized SQL with `?` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind values in placeholder order.
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// The statement with every placeholder replaced by its literal value.
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// Builds the parameterized and literal statements side by side.
#[derive(Debug, Default)]
pub struct StatementBuilder {
    sql: String,
    literal: String,
    params: Vec<SqlParam>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw SQL to both renderings.
    pub fn push_sql(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self.literal.push_str(sql);
        self
    }

    /// Appends a placeholder and its bound value.
    pub fn push_param(&mut self, param: SqlParam) -> &mut Self {
        self.sql.push('?');
        self.literal.push_str(&param.literal());
        self.params.push(param);
        self
    }

    /// Appends `values` separated by `sep`, each written by `write`.
    fn push_list<T>(
        &mut self,
        values: impl IntoIterator<Item = T>,
        sep: &str,
        mut write: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.push_sql(sep);
            }
            write(self, value);
        }
        self
    }

    pub fn finish(self) -> BoundStatement {
        BoundStatement {
            sql: self.sql,
            params: self.params,
            literal: self.literal,
        }
    }
}

/// Splits a statement template at each `?` placeholder outside quoted
/// literals. A template with `n` placeholders yields `n + 1` segments.
pub fn split_placeholders(template: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, ch) in template.char_indices() {
        match (quote, ch) {
            (None, '\'' | '"') => quote = Some(ch),
            (Some(q), c) if c == q => quote = None,
            (None, '?') => {
                segments.push(&template[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&template[start..]);
    segments
}

/// Fills a template's placeholders with `params` in order.
fn bind_template(
    template: &str,
    mut params: impl ExactSizeIterator<Item = SqlParam>,
) -> Result<BoundStatement> {
    let segments = split_placeholders(template);
    let placeholders = segments.len() - 1;
    if params.len() != placeholders {
        return Err(StoreError::ParameterMismatch {
            placeholders,
            values: params.len(),
        });
    }
    let mut builder = StatementBuilder::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            if let Some(param) = params.next() {
                builder.push_param(param);
            }
        }
        builder.push_sql(segment);
    }
    Ok(builder.finish())
}

/// Binds a row's cells positionally into its INSERT template.
///
/// # Errors
///
/// Returns [`StoreError::MissingStatement`] if the row has no template and
/// [`StoreError::ParameterMismatch`] if the template's placeholder count
/// differs from the number of cells.
pub fn insert(row: &Row) -> Result<BoundStatement> {
    let template = row
        .statement()
        .ok_or_else(|| StoreError::MissingStatement(row.table().to_string()))?;
    bind_template(
        template,
        row.cells().iter().map(|cell| SqlParam::from_cell(cell, false)),
    )
}

/// Builds `DELETE FROM <table> WHERE k1=? AND k2=? ...;` from the row's key
/// cells.
///
/// # Errors
///
/// Returns [`StoreError::NoKeyCells`] if the row has no key cells.
pub fn delete(row: &Row) -> Result<BoundStatement> {
    let keys: Vec<&Cell> = row.key_cells().collect();
    if keys.is_empty() {
        return Err(StoreError::NoKeyCells(row.table().to_string()));
    }
    let mut builder = StatementBuilder::new();
    builder.push_sql(&format!("DELETE FROM {} WHERE ", row.table()));
    push_assignments(&mut builder, keys, " AND ");
    builder.push_sql(";");
    Ok(builder.finish())
}

/// Builds `UPDATE <table> SET c1=?, ... WHERE k1=? AND ...;`.
///
/// Values are bound new-row cells first, then the old row's key cells,
/// each in declared order.
///
/// # Errors
///
/// Returns [`StoreError::EmptyRow`] if `new` has no cells and
/// [`StoreError::NoKeyCells`] if `old` has no key cells.
pub fn update(old: &Row, new: &Row) -> Result<BoundStatement> {
    if new.is_empty() {
        return Err(StoreError::EmptyRow(old.table().to_string()));
    }
    let keys: Vec<&Cell> = old.key_cells().collect();
    if keys.is_empty() {
        return Err(StoreError::NoKeyCells(old.table().to_string()));
    }
    let mut builder = StatementBuilder::new();
    builder.push_sql(&format!("UPDATE {} SET ", old.table()));
    push_assignments(&mut builder, new.cells(), ", ");
    builder.push_sql(" WHERE ");
    push_assignments(&mut builder, keys, " AND ");
    builder.push_sql(";");
    Ok(builder.finish())
}

fn push_assignments<'c>(
    builder: &mut StatementBuilder,
    cells: impl IntoIterator<Item = &'c Cell>,
    sep: &str,
) {
    builder.push_list(cells, sep, |b, cell| {
        b.push_sql(&format!("{}=", cell.column()))
            .push_param(SqlParam::from_cell(cell, false));
    });
}

/// Splits criteria into columns to select (empty cells) and filters
/// (non-empty cells), each in criteria order.
pub fn partition(criteria: &[Cell]) -> (Vec<&Cell>, Vec<&Cell>) {
    criteria.iter().partition(|cell| cell.is_empty())
}

/// Synthesizes a `SELECT DISTINCT` across the join span of the criteria.
///
/// # Errors
///
/// Returns [`StoreError::EmptyCriteria`] for an empty criteria list and
/// [`StoreError::UnknownTable`] if a cell belongs to no known table.
pub fn criteria_select(registry: &SchemaRegistry, criteria: &[Cell]) -> Result<BoundStatement> {
    let (selects, conditions) = partition(criteria);
    let span = registry.join_span(criteria.iter().map(Cell::table))?;

    let mut builder = StatementBuilder::new();
    builder.push_sql("SELECT DISTINCT ");
    if selects.is_empty() {
        builder.push_sql("*");
    } else {
        builder.push_list(selects, ", ", |b, cell| {
            b.push_sql(&cell.qualified_name());
        });
    }
    builder.push_sql(" FROM ");
    for (i, link) in span.iter().enumerate() {
        match (i, link.on) {
            (0, _) | (_, None) => builder.push_sql(link.table),
            (_, Some(on)) => builder.push_sql(&format!(" JOIN {} ON {on}", link.table)),
        };
    }
    if !conditions.is_empty() {
        builder.push_sql(" WHERE ");
        builder.push_list(conditions, " AND ", |b, cell| {
            let op = match cell.sql_type() {
                SqlType::Text => " LIKE ",
                SqlType::Integer | SqlType::Boolean => "=",
            };
            b.push_sql(&format!("{}{op}", cell.qualified_name()))
                .push_param(search_param(cell));
        });
    }
    builder.push_sql(";");
    Ok(builder.finish())
}

/// Binds criteria into a canned search statement.
///
/// The statement may reuse the same criteria several times; bind values
/// cycle through `criteria` by placeholder index modulo its length.
///
/// # Errors
///
/// Returns [`StoreError::EmptyCriteria`] for an empty criteria list and
/// [`StoreError::ParameterMismatch`] if the placeholder count is not a
/// multiple of the criteria count.
pub fn canned_select(statement: &str, criteria: &[Cell]) -> Result<BoundStatement> {
    if criteria.is_empty() {
        return Err(StoreError::EmptyCriteria);
    }
    let placeholders = split_placeholders(statement).len() - 1;
    if placeholders % criteria.len() != 0 {
        return Err(StoreError::ParameterMismatch {
            placeholders,
            values: criteria.len(),
        });
    }
    bind_template(
        statement,
        (0..placeholders).map(|i| search_param(&criteria[i % criteria.len()])),
    )
}

fn search_param(cell: &Cell) -> SqlParam {
    SqlParam::from_cell(cell, cell.sql_type() == SqlType::Text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::HOMESHOW;
    use homeshow_core::PersonnelRole;

    fn person(first: &str, last: &str) -> Row {
        Row::with_cells(
            "personnel",
            Some("INSERT INTO personnel (first_name, last_name) VALUES (?, ?);"),
            vec![
                Cell::text("first_name", "personnel", first).with_key(true),
                Cell::text("last_name", "personnel", last).with_key(true),
            ],
        )
    }

    #[test]
    fn test_split_placeholders_skips_quoted() {
        assert_eq!(split_placeholders("a ? b '?' c ?"), vec!["a ", " b '?' c ", ""]);
        assert_eq!(split_placeholders("no params").len(), 1);
        assert_eq!(split_placeholders("\"x?\" = ?").len(), 2);
    }

    #[test]
    fn test_insert_binds_positionally() {
        let bound = insert(&person("Ada", "Lovelace")).unwrap();
        assert_eq!(
            bound.sql(),
            "INSERT INTO personnel (first_name, last_name) VALUES (?, ?);"
        );
        assert_eq!(
            bound.params(),
            &[
                SqlParam::Text("Ada".into()),
                SqlParam::Text("Lovelace".into())
            ]
        );
        assert_eq!(
            bound.literal(),
            "INSERT INTO personnel (first_name, last_name) VALUES ('Ada', 'Lovelace');"
        );
    }

    #[test]
    fn test_insert_literal_escapes_quotes_and_booleans() {
        let row = Row::with_cells(
            "show",
            Some("INSERT INTO show (title, year, duration, folder, is_movie) VALUES (?, ?, ?, ?, ?);"),
            vec![
                Cell::text("title", "show", "Ocean's Eleven"),
                Cell::integer("year", "show", 2001),
                Cell::integer("duration", "show", 116),
                Cell::text("folder", "show", ""),
                Cell::boolean("is_movie", "show", Some(true)),
            ],
        );
        let bound = insert(&row).unwrap();
        assert_eq!(
            bound.literal(),
            "INSERT INTO show (title, year, duration, folder, is_movie) VALUES ('Ocean''s Eleven', 2001, 116, '', 1);"
        );
        assert_eq!(bound.params()[4], SqlParam::Integer(1));
    }

    #[test]
    fn test_insert_requires_template_and_matching_count() {
        let mut row = person("Ada", "Lovelace");
        row.push(Cell::text("extra", "personnel", "x"));
        assert!(matches!(
            insert(&row),
            Err(StoreError::ParameterMismatch { placeholders: 2, values: 3 })
        ));

        let bare = Row::with_cells("genre", None, vec![Cell::text("name", "genre", "Drama")]);
        assert!(matches!(insert(&bare), Err(StoreError::MissingStatement(_))));
    }

    #[test]
    fn test_delete_uses_key_cells_only() {
        let row = Row::with_cells(
            "show",
            None,
            vec![
                Cell::text("title", "show", "Matrix").with_key(true),
                Cell::integer("duration", "show", 136),
                Cell::integer("year", "show", 1999).with_key(true),
            ],
        );
        let bound = delete(&row).unwrap();
        assert_eq!(bound.sql(), "DELETE FROM show WHERE title=? AND year=?;");
        assert_eq!(
            bound.literal(),
            "DELETE FROM show WHERE title='Matrix' AND year=1999;"
        );
    }

    #[test]
    fn test_delete_without_keys_fails() {
        let row = Row::with_cells("show", None, vec![Cell::integer("duration", "show", 1)]);
        assert!(matches!(delete(&row), Err(StoreError::NoKeyCells(_))));
    }

    #[test]
    fn test_update_binds_new_values_then_old_keys() {
        let old = Row::with_cells(
            "t",
            None,
            vec![
                Cell::integer("k1", "t", 5).with_key(true),
                Cell::text("k2", "t", "x").with_key(true),
            ],
        );
        let new = Row::with_cells(
            "t",
            None,
            vec![Cell::text("c1", "t", "y"), Cell::integer("c2", "t", 7)],
        );
        let bound = update(&old, &new).unwrap();
        assert_eq!(bound.sql(), "UPDATE t SET c1=?, c2=? WHERE k1=? AND k2=?;");
        assert_eq!(
            bound.params(),
            &[
                SqlParam::Text("y".into()),
                SqlParam::Integer(7),
                SqlParam::Integer(5),
                SqlParam::Text("x".into()),
            ]
        );
        assert_eq!(
            bound.literal(),
            "UPDATE t SET c1='y', c2=7 WHERE k1=5 AND k2='x';"
        );
    }

    #[test]
    fn test_update_errors() {
        let keyed = person("Ada", "Lovelace");
        let empty = Row::new("personnel", None);
        assert!(matches!(update(&keyed, &empty), Err(StoreError::EmptyRow(_))));
        assert!(update(&keyed.keys_only(), &keyed).is_ok());
        let unkeyed = Row::with_cells(
            "personnel",
            None,
            vec![Cell::text("first_name", "personnel", "Ada")],
        );
        assert!(matches!(update(&unkeyed, &keyed), Err(StoreError::NoKeyCells(_))));
    }

    #[test]
    fn test_partition_by_emptiness() {
        let criteria = vec![
            Cell::text("title", "show", ""),
            Cell::integer("year", "show", -1),
            Cell::boolean("is_movie", "show", None),
            Cell::role("role", "participates", PersonnelRole::None),
            Cell::text("name", "genre", "Drama"),
            Cell::integer("duration", "show", 0),
            Cell::boolean("is_movie", "show", Some(false)),
            Cell::role("role", "participates", PersonnelRole::Actor),
        ];
        let (selects, conditions) = partition(&criteria);
        assert_eq!(selects.len(), 4);
        assert_eq!(conditions.len(), 4);
        assert!(selects.iter().all(|c| c.is_empty()));
        assert!(conditions.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_criteria_select_joins_span() {
        let criteria = vec![
            Cell::text("name", "genre", "Drama"),
            Cell::text("title", "show", ""),
        ];
        let bound = criteria_select(&HOMESHOW, &criteria).unwrap();
        assert_eq!(
            bound.sql(),
            "SELECT DISTINCT show.title FROM show \
             JOIN hasgenre ON hasgenre.show_title=show.title AND hasgenre.show_year=show.year \
             JOIN genre ON genre.name=hasgenre.genre_name \
             WHERE genre.name LIKE ?;"
        );
        assert_eq!(bound.params(), &[SqlParam::Text("%Drama%".into())]);
    }

    #[test]
    fn test_criteria_select_star_and_operators() {
        let criteria = vec![
            Cell::text("title", "show", "Matrix"),
            Cell::integer("year", "show", 1999),
            Cell::boolean("is_movie", "show", Some(true)),
        ];
        let bound = criteria_select(&HOMESHOW, &criteria).unwrap();
        assert_eq!(
            bound.sql(),
            "SELECT DISTINCT * FROM show WHERE show.title LIKE ? AND show.year=? AND show.is_movie=?;"
        );
        assert_eq!(
            bound.literal(),
            "SELECT DISTINCT * FROM show WHERE show.title LIKE '%Matrix%' AND show.year=1999 AND show.is_movie=1;"
        );
    }

    #[test]
    fn test_criteria_select_without_conditions() {
        let criteria = vec![
            Cell::text("first_name", "personnel", ""),
            Cell::role("role", "participates", PersonnelRole::None),
        ];
        let bound = criteria_select(&HOMESHOW, &criteria).unwrap();
        assert_eq!(
            bound.sql(),
            "SELECT DISTINCT personnel.first_name, participates.role FROM personnel \
             JOIN participates ON participates.personnel_fname=personnel.first_name AND participates.personnel_lname=personnel.last_name;"
        );
        assert!(bound.params().is_empty());
    }

    #[test]
    fn test_criteria_select_role_uses_like() {
        let criteria = vec![Cell::role("role", "participates", PersonnelRole::Director)];
        let bound = criteria_select(&HOMESHOW, &criteria).unwrap();
        assert_eq!(
            bound.literal(),
            "SELECT DISTINCT * FROM participates WHERE participates.role LIKE '%Director%';"
        );
    }

    #[test]
    fn test_criteria_select_empty() {
        assert!(matches!(
            criteria_select(&HOMESHOW, &[]),
            Err(StoreError::EmptyCriteria)
        ));
    }

    #[test]
    fn test_canned_select_cycles_criteria() {
        let criteria = vec![
            Cell::text("first_name", "personnel", "Ada"),
            Cell::integer("year", "show", -1),
        ];
        let bound = canned_select(
            "SELECT * FROM x WHERE a LIKE ? AND b=? OR a LIKE ? AND b=?;",
            &criteria,
        )
        .unwrap();
        assert_eq!(
            bound.params(),
            &[
                SqlParam::Text("%Ada%".into()),
                SqlParam::Integer(-1),
                SqlParam::Text("%Ada%".into()),
                SqlParam::Integer(-1),
            ]
        );
        assert_eq!(
            bound.literal(),
            "SELECT * FROM x WHERE a LIKE '%Ada%' AND b=-1 OR a LIKE '%Ada%' AND b=-1;"
        );
    }

    #[test]
    fn test_canned_select_rejects_uneven_placeholders() {
        let criteria = vec![Cell::text("a", "t", "x"), Cell::text("b", "t", "y")];
        assert!(matches!(
            canned_select("SELECT ? , ?, ?;", &criteria),
            Err(StoreError::ParameterMismatch { placeholders: 3, values: 2 })
        ));
        assert!(matches!(canned_select("SELECT 1;", &[]), Err(StoreError::EmptyCriteria)));
    }

    #[test]
    fn test_canned_select_empty_role_matches_everything() {
        let criteria = vec![Cell::role("role", "participates", PersonnelRole::None)];
        let bound = canned_select("SELECT ? ;", &criteria).unwrap();
        assert_eq!(bound.params(), &[SqlParam::Text("%%".into())]);
    }
}
