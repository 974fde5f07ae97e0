//! Controller between a HomeShow user interface and its database.
//!
//! A user interface implements [`View`] and forwards user actions to a
//! [`ViewObserver`]. [`Controller`] is the observer: it answers page
//! requests with the store's row templates, runs inserts, deletes, updates
//! and searches through a [`HomeShowStore`](homeshow_sqlite::HomeShowStore),
//! and reports every outcome back to the view as a message. The view never
//! sees or builds SQL other than the statements shown in those messages.
//!
//! # Example
//!
//! ```
//! use homeshow_controller::{Controller, SearchPage, View, ViewObserver};
//! use homeshow_core::Row;
//! use homeshow_sqlite::HomeShowStore;
//!
//! #[derive(Default)]
//! struct Console {
//!     lines: Vec<String>,
//! }
//!
//! impl View for Console {
//!     fn clear_page(&mut self) {}
//!     fn display_main_page(&mut self) {}
//!     fn display_insert_page(&mut self, _: &[Row]) {}
//!     fn display_quick_search_page(&mut self, templates: &[Row]) {
//!         for t in templates {
//!             self.lines.push(t.table().to_string());
//!         }
//!     }
//!     fn display_criteria_search_page(&mut self, _: &[Row]) {}
//!     fn display_info(&mut self, m: &str) { self.lines.push(m.to_string()) }
//!     fn display_warning(&mut self, m: &str) { self.lines.push(m.to_string()) }
//!     fn display_error(&mut self, m: &str) { self.lines.push(m.to_string()) }
//! }
//!
//! let store = HomeShowStore::open_in_memory().unwrap();
//! let mut controller = Controller::new(Console::default(), store);
//! controller.search_page_requested(SearchPage::Quick);
//! assert_eq!(
//!     controller.view().lines,
//!     vec!["All Shows By Personnel", "All Personnel By Shows"]
//! );
//! controller.exit_requested();
//! ```

mod controller;
mod observer;

pub use controller::Controller;
pub use observer::{SearchPage, View, ViewObserver};
