//! Routes view requests to the data access façade.
//!
//! Text cells arriving from the view are trimmed before use. Storage
//! results come back to the view as messages: the executed statement on
//! success, a warning for data rejected by a table constraint, and an
//! error for anything else.

use homeshow_core::{Cell, Row};
use homeshow_sqlite::{HomeShowStore, StoreError};
use tracing::{debug, warn};

use crate::observer::{SearchPage, View, ViewObserver};

/// Connects a [`View`] to a [`HomeShowStore`].
#[derive(Debug)]
pub struct Controller<V: View> {
    view: V,
    store: HomeShowStore,
}

/// The mutation being reported, used to word messages.
#[derive(Debug, Clone, Copy)]
enum Mutation {
    Insert,
    Delete,
    Update,
}

impl Mutation {
    fn success(self, table: &str, statement: &str) -> String {
        let action = match self {
            Mutation::Insert => "inserted to",
            Mutation::Delete => "deleted from",
            Mutation::Update => "updated into",
        };
        format!("Data was {action} table '{table}' using the statement:\n\n{statement}")
    }

    fn rejected(self, table: &str) -> String {
        let data = match self {
            Mutation::Insert => format!("new '{table}' data"),
            Mutation::Delete | Mutation::Update => format!("'{table}' data"),
        };
        format!(
            "Incorrect/Incomplete {data} due to table constraint(s). Please check your data and try again."
        )
    }

    fn failed(self, table: &str) -> String {
        match self {
            Mutation::Insert => format!(
                "Error while inserting new '{table}' data. Please check your data and try again."
            ),
            Mutation::Delete => format!(
                "Error while deleting data from table '{table}'. Please check your input and try again."
            ),
            Mutation::Update => format!(
                "Error while updating data into table '{table}'. Please check your input and try again."
            ),
        }
    }
}

impl<V: View> Controller<V> {
    pub fn new(view: V, store: HomeShowStore) -> Self {
        Self { view, store }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &HomeShowStore {
        &self.store
    }

    pub fn into_parts(self) -> (V, HomeShowStore) {
        (self.view, self.store)
    }

    fn report(&mut self, mutation: Mutation, table: &str, outcome: Result<String, StoreError>) {
        match outcome {
            Ok(statement) => self.view.display_info(&mutation.success(table, &statement)),
            Err(err) if err.is_constraint_violation() => {
                warn!(table, error = %err, "Data rejected by constraint");
                self.view.display_warning(&mutation.rejected(table));
            }
            Err(err) => {
                warn!(table, error = %err, "Data change failed");
                self.view.display_error(&mutation.failed(table));
            }
        }
    }
}

impl<V: View> ViewObserver for Controller<V> {
    fn main_page_requested(&mut self) {
        self.view.clear_page();
        self.view.display_main_page();
    }

    fn insert_page_requested(&mut self) {
        self.view.clear_page();
        self.view.display_insert_page(self.store.insert_templates());
    }

    fn search_page_requested(&mut self, page: SearchPage) {
        self.view.clear_page();
        match page {
            SearchPage::Quick => self
                .view
                .display_quick_search_page(self.store.quick_search_templates()),
            SearchPage::Criteria => self
                .view
                .display_criteria_search_page(self.store.insert_templates()),
        }
    }

    fn exit_requested(&mut self) {
        if let Err(err) = self.store.close() {
            warn!(error = %err, "Closing the database failed");
            self.view
                .display_error("Error while closing database connection.");
        }
    }

    fn insert_row_requested(&mut self, row: &Row) {
        let outcome = self.store.insert_row(&row.trimmed());
        self.report(Mutation::Insert, row.table(), outcome);
    }

    fn delete_row_requested(&mut self, row: &Row) {
        let outcome = self.store.delete_row(&row.trimmed());
        self.report(Mutation::Delete, row.table(), outcome);
    }

    fn update_row_requested(&mut self, old: &Row, new: &Row) {
        let outcome = self.store.update_row(&old.trimmed(), &new.trimmed());
        self.report(Mutation::Update, old.table(), outcome);
    }

    fn search_requested(&mut self, criteria: &[Cell], statement: Option<&str>) -> Vec<Row> {
        if criteria.is_empty() {
            return Vec::new();
        }
        let criteria: Vec<Cell> = criteria.iter().map(Cell::trimmed).collect();
        match self.store.get_data(&criteria, statement) {
            Ok(rows) => {
                debug!(rows = rows.len(), "Search completed");
                rows
            }
            Err(err) => {
                warn!(error = %err, "Search failed");
                self.view.display_error(
                    "Error while searching using requested data. Please check your data and try again.",
                );
                Vec::new()
            }
        }
    }
}
