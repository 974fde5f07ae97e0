//! The two interfaces between the presentation layer and the controller.

use homeshow_core::{Cell, Row};

/// Which search page to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPage {
    /// Canned searches from the quick-search templates.
    Quick,
    /// Free-form criteria built from the insert templates.
    Criteria,
}

/// Display operations a user interface provides to the controller.
pub trait View {
    fn clear_page(&mut self);

    fn display_main_page(&mut self);

    /// Shows one editable row per template for inserting data.
    fn display_insert_page(&mut self, templates: &[Row]);

    fn display_quick_search_page(&mut self, templates: &[Row]);

    fn display_criteria_search_page(&mut self, templates: &[Row]);

    fn display_info(&mut self, message: &str);

    /// Reports rejected input the user can correct.
    fn display_warning(&mut self, message: &str);

    fn display_error(&mut self, message: &str);
}

/// Requests a user interface sends to its controller.
pub trait ViewObserver {
    fn main_page_requested(&mut self);

    fn insert_page_requested(&mut self);

    fn search_page_requested(&mut self, page: SearchPage);

    /// Releases storage; the view is expected to shut down afterwards.
    fn exit_requested(&mut self);

    fn insert_row_requested(&mut self, row: &Row);

    /// Deletes the record identified by `row`'s key cells.
    fn delete_row_requested(&mut self, row: &Row);

    fn update_row_requested(&mut self, old: &Row, new: &Row);

    /// Runs a search and returns its result rows. Failures are reported to
    /// the view and yield no rows.
    fn search_requested(&mut self, criteria: &[Cell], statement: Option<&str>) -> Vec<Row>;
}
