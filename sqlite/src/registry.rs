//! Static knowledge of the table join chain and key columns.
//!
//! The five tables are always joined in the same order:
//!
//! ```text
//! personnel -> participates -> show -> hasgenre -> genre
//! ```
//!
//! Each table after the first carries the `ON` condition relating it to the
//! table before it. A query touching any subset of tables joins the
//! contiguous slice of this chain spanning the earliest and latest of them.

use crate::error::{Result, StoreError};

/// One step of the join chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinLink {
    /// Table joined at this step.
    pub table: &'static str,
    /// Join condition against the previous table; `None` for the first.
    pub on: Option<&'static str>,
}

/// Read-only registry of the join chain and the key columns.
#[derive(Debug)]
pub struct SchemaRegistry {
    links: &'static [JoinLink],
    keys: &'static [&'static str],
}

/// Registry for the HomeShow tables.
pub static HOMESHOW: SchemaRegistry = SchemaRegistry {
    links: &[
        JoinLink {
            table: "personnel",
            on: None,
        },
        JoinLink {
            table: "participates",
            on: Some(
                "participates.personnel_fname=personnel.first_name AND participates.personnel_lname=personnel.last_name",
            ),
        },
        JoinLink {
            table: "show",
            on: Some("show.title=participates.show_title AND show.year=participates.show_year"),
        },
        JoinLink {
            table: "hasgenre",
            on: Some("hasgenre.show_title=show.title AND hasgenre.show_year=show.year"),
        },
        JoinLink {
            table: "genre",
            on: Some("genre.name=hasgenre.genre_name"),
        },
    ],
    keys: &[
        "personnel.first_name",
        "personnel.last_name",
        "participates.personnel_fname",
        "participates.personnel_lname",
        "participates.show_title",
        "participates.show_year",
        "participates.role",
        "show.title",
        "show.year",
        "hasgenre.show_title",
        "hasgenre.show_year",
        "hasgenre.genre_name",
        "genre.name",
    ],
};

impl SchemaRegistry {
    /// Returns the table names in canonical order.
    pub fn tables(&self) -> impl Iterator<Item = &'static str> {
        self.links.iter().map(|link| link.table)
    }

    /// Returns the index of `table` in the join chain.
    pub fn position(&self, table: &str) -> Option<usize> {
        self.links.iter().position(|link| link.table == table)
    }

    /// Returns the join condition for `table`, if it is not the first.
    pub fn join_condition(&self, table: &str) -> Option<&'static str> {
        self.links
            .iter()
            .find(|link| link.table == table)
            .and_then(|link| link.on)
    }

    /// Returns `true` if `table.column` is part of a primary key.
    pub fn is_key(&self, table: &str, column: &str) -> bool {
        self.keys.iter().any(|key| {
            key.split_once('.')
                .is_some_and(|(t, c)| t == table && c == column)
        })
    }

    /// Returns the minimal contiguous slice of the join chain covering every
    /// table in `tables`.
    ///
    /// Tables between the earliest and latest referenced ones are included
    /// even if unreferenced, since the chain needs them to connect.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyCriteria`] when `tables` is empty and
    /// [`StoreError::UnknownTable`] for a table outside the chain.
    pub fn join_span<'t, I>(&self, tables: I) -> Result<&'static [JoinLink]>
    where
        I: IntoIterator<Item = &'t str>,
    {
        let mut bounds: Option<(usize, usize)> = None;
        for table in tables {
            let idx = self
                .position(table)
                .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
            bounds = Some(match bounds {
                Some((first, last)) => (first.min(idx), last.max(idx)),
                None => (idx, idx),
            });
        }
        let (first, last) = bounds.ok_or(StoreError::EmptyCriteria)?;
        Ok(&self.links[first..=last])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_tables(tables: &[&str]) -> Vec<&'static str> {
        HOMESHOW
            .join_span(tables.iter().copied())
            .unwrap()
            .iter()
            .map(|link| link.table)
            .collect()
    }

    #[test]
    fn test_canonical_order() {
        let tables: Vec<_> = HOMESHOW.tables().collect();
        assert_eq!(
            tables,
            vec!["personnel", "participates", "show", "hasgenre", "genre"]
        );
    }

    #[test]
    fn test_first_table_has_no_join_condition() {
        assert!(HOMESHOW.join_condition("personnel").is_none());
        assert_eq!(
            HOMESHOW.join_condition("genre"),
            Some("genre.name=hasgenre.genre_name")
        );
    }

    #[test]
    fn test_join_span_fills_gaps() {
        assert_eq!(span_tables(&["genre", "show"]), vec!["show", "hasgenre", "genre"]);
        assert_eq!(
            span_tables(&["personnel", "show"]),
            vec!["personnel", "participates", "show"]
        );
    }

    #[test]
    fn test_join_span_single_table() {
        assert_eq!(span_tables(&["hasgenre", "hasgenre"]), vec!["hasgenre"]);
    }

    #[test]
    fn test_join_span_full_chain() {
        assert_eq!(span_tables(&["genre", "personnel"]).len(), 5);
    }

    #[test]
    fn test_join_span_errors() {
        assert!(matches!(
            HOMESHOW.join_span(std::iter::empty()),
            Err(StoreError::EmptyCriteria)
        ));
        assert!(matches!(
            HOMESHOW.join_span(["show", "studio"]),
            Err(StoreError::UnknownTable(t)) if t == "studio"
        ));
    }

    #[test]
    fn test_keys() {
        assert!(HOMESHOW.is_key("personnel", "first_name"));
        assert!(HOMESHOW.is_key("participates", "role"));
        assert!(HOMESHOW.is_key("show", "year"));
        assert!(!HOMESHOW.is_key("show", "duration"));
        assert!(!HOMESHOW.is_key("show", "is_movie"));
        assert!(!HOMESHOW.is_key("personnel", "title"));
    }
}
