//! Value type definitions shared by cells, rows and the storage layer.
//!
//! The closed set of value kinds a [`Cell`](crate::Cell) can hold is modeled
//! as the [`CellValue`] tagged union, with [`ValueKind`] naming each variant
//! and [`SqlType`] describing how the value crosses the storage boundary.
//!
//! # Empty values
//!
//! Form fields and search criteria use one sentinel per kind to mean
//! "not filled in":
//!
//! | Kind      | Sentinel                  |
//! |-----------|---------------------------|
//! | `Text`    | `""`                      |
//! | `Integer` | any negative number (`-1`)|
//! | `Boolean` | no value                  |
//! | `Role`    | [`PersonnelRole::None`]   |
//!
//! A missing value counts as empty for every kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role a person can have in a show.
///
/// [`PersonnelRole::None`] is a sentinel meaning "no role filter"; it is
/// never accepted by the `participates.role` CHECK constraint.
///
/// # Examples
///
/// ```
/// use homeshow_core::PersonnelRole;
///
/// let role: PersonnelRole = "director".parse().unwrap();
/// assert_eq!(role, PersonnelRole::Director);
/// assert_eq!(role.as_str(), "Director");
/// assert_eq!(PersonnelRole::None.as_str(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PersonnelRole {
    /// No role (not accepted by the database).
    #[default]
    None,
    /// The person acts in the show.
    Actor,
    /// The person directs the show.
    Director,
    /// The person wrote the show.
    Author,
}

impl PersonnelRole {
    /// Every role that may be persisted, in declaration order.
    pub const ALL_BUT_NONE: [PersonnelRole; 3] = [
        PersonnelRole::Actor,
        PersonnelRole::Director,
        PersonnelRole::Author,
    ];

    /// Returns the name stored in the database (`""` for [`PersonnelRole::None`]).
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonnelRole::None => "",
            PersonnelRole::Actor => "Actor",
            PersonnelRole::Director => "Director",
            PersonnelRole::Author => "Author",
        }
    }
}

impl fmt::Display for PersonnelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`PersonnelRole`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown personnel role: '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for PersonnelRole {
    type Err = UnknownRole;

    /// Parses a role name case-insensitively. The empty string and `"none"`
    /// both yield [`PersonnelRole::None`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(PersonnelRole::None),
            "actor" => Ok(PersonnelRole::Actor),
            "director" => Ok(PersonnelRole::Director),
            "author" => Ok(PersonnelRole::Author),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// The kind of value a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Free text.
    Text,
    /// Whole number.
    Integer,
    /// True or false, stored as `0`/`1`.
    Boolean,
    /// A [`PersonnelRole`], stored by name.
    Role,
}

impl ValueKind {
    /// Returns the storage type used when binding values of this kind.
    ///
    /// Roles are stored as text, so they are matched with `LIKE` and
    /// quoted in literal statements just like text.
    pub fn sql_type(&self) -> SqlType {
        match self {
            ValueKind::Text | ValueKind::Role => SqlType::Text,
            ValueKind::Integer => SqlType::Integer,
            ValueKind::Boolean => SqlType::Boolean,
        }
    }

    /// Returns the "not filled in" value for this kind.
    pub fn empty_value(&self) -> Option<CellValue> {
        match self {
            ValueKind::Text => Some(CellValue::Text(String::new())),
            ValueKind::Integer => Some(CellValue::Integer(-1)),
            ValueKind::Boolean => None,
            ValueKind::Role => Some(CellValue::Role(PersonnelRole::None)),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "Text",
            ValueKind::Integer => "Integer",
            ValueKind::Boolean => "Boolean",
            ValueKind::Role => "Role",
        };
        f.write_str(name)
    }
}

/// Storage-side type tag of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    /// `TEXT` column; matched with `LIKE`, quoted in literals.
    Text,
    /// `INTEGER` column.
    Integer,
    /// `BOOLEAN` column (an integer restricted to `0` and `1`).
    Boolean,
}

/// A typed cell value.
///
/// # Examples
///
/// ```
/// use homeshow_core::{CellValue, PersonnelRole, ValueKind};
///
/// let value = CellValue::from("Matrix");
/// assert_eq!(value.kind(), ValueKind::Text);
/// assert!(!value.is_empty());
///
/// assert!(CellValue::Integer(-1).is_empty());
/// assert!(CellValue::Role(PersonnelRole::None).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellValue {
    /// Text value.
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Boolean value.
    Boolean(bool),
    /// Personnel role value.
    Role(PersonnelRole),
}

impl CellValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            CellValue::Text(_) => ValueKind::Text,
            CellValue::Integer(_) => ValueKind::Integer,
            CellValue::Boolean(_) => ValueKind::Boolean,
            CellValue::Role(_) => ValueKind::Role,
        }
    }

    /// Returns `true` if this value is its kind's sentinel.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Text(s) => s.is_empty(),
            CellValue::Integer(n) => *n < 0,
            CellValue::Boolean(_) => false,
            CellValue::Role(role) => *role == PersonnelRole::None,
        }
    }

    /// Returns the text content if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the role if this is a role value.
    pub fn as_role(&self) -> Option<PersonnelRole> {
        match self {
            CellValue::Role(role) => Some(*role),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(n) => write!(f, "{n}"),
            CellValue::Boolean(b) => write!(f, "{b}"),
            CellValue::Role(role) => f.write_str(role.as_str()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<PersonnelRole> for CellValue {
    fn from(value: PersonnelRole) -> Self {
        CellValue::Role(value)
    }
}
