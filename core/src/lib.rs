//! Row and cell data model for the HomeShow organizer.
//!
//! This crate defines the exchange format between the data access layer and
//! whatever presents the data:
//!
//! - [`Cell`]: a named, typed field value with key and live-search flags.
//! - [`Row`]: an ordered set of cells for one table plus its statement text.
//! - [`CellValue`]: the closed set of values a cell can hold (text, integer,
//!   boolean, [`PersonnelRole`]).
//! - [`ValueKind`] and [`SqlType`]: the value's kind and its storage type.
//!
//! Empty values follow one sentinel per kind (`""`, negative integers, a
//! missing boolean, [`PersonnelRole::None`]); see the [`types`] module docs.
//!
//! # Example
//!
//! ```
//! use homeshow_core::*;
//!
//! let template = Row::with_cells(
//!     "show",
//!     None,
//!     vec![
//!         Cell::empty("title", "show", ValueKind::Text).with_key(true),
//!         Cell::empty("year", "show", ValueKind::Integer).with_key(true),
//!     ],
//! );
//!
//! let title = template.cells()[0].with_value(Some("Matrix".into())).unwrap();
//! assert!(!title.is_empty());
//! assert!(template.cells()[1].is_empty());
//! ```

mod cell;
mod row;
pub mod types;

pub use cell::{Cell, CellError};
pub use row::Row;
pub use types::{CellValue, PersonnelRole, SqlType, UnknownRole, ValueKind};
