//! SQL schema generation for the HomeShow tables.
//!
//! Generates the `CREATE TABLE` statements for the five fixed tables and the
//! matching `DROP TABLE` script.
//!
//! # Table structure
//!
//! - `personnel`: people, keyed by first and last name
//! - `show`: shows, keyed by title and year
//! - `genre`: genre names
//! - `participates`: who had which role in which show
//! - `hasgenre`: which genres a show belongs to
//!
//! Both relationship tables cascade deletes and updates from their parents.

use homeshow_core::PersonnelRole;
use rusqlite::Connection;

use crate::error::Result;

/// Builds the `IN (...)` list for the `participates.role` CHECK constraint.
fn role_check_list() -> String {
    PersonnelRole::ALL_BUT_NONE
        .iter()
        .map(|role| format!("'{}'", role.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generates the complete SQL schema for all tables.
pub fn generate_schema_sql() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS personnel (
    first_name TEXT NOT NULL CHECK (first_name <> ''),
    last_name TEXT NOT NULL CHECK (last_name <> ''),
    PRIMARY KEY (first_name, last_name)
);

CREATE TABLE IF NOT EXISTS show (
    title TEXT NOT NULL CHECK (title <> ''),
    year INTEGER NOT NULL CHECK (year BETWEEN 1800 AND 2100),
    duration INTEGER NOT NULL CHECK (duration BETWEEN 0 AND 4000000) DEFAULT 0,
    folder TEXT NOT NULL DEFAULT '',
    is_movie BOOLEAN NOT NULL CHECK (is_movie IN (0, 1)),
    PRIMARY KEY (title, year)
);

CREATE TABLE IF NOT EXISTS genre (
    name TEXT PRIMARY KEY CHECK (name <> '')
);

CREATE TABLE IF NOT EXISTS participates (
    personnel_fname TEXT NOT NULL,
    personnel_lname TEXT NOT NULL,
    show_title TEXT NOT NULL,
    show_year INTEGER NOT NULL,
    role TEXT NOT NULL CHECK (role IN ({roles})),
    FOREIGN KEY (personnel_fname, personnel_lname) REFERENCES personnel (first_name, last_name) ON DELETE CASCADE ON UPDATE CASCADE,
    FOREIGN KEY (show_title, show_year) REFERENCES show (title, year) ON DELETE CASCADE ON UPDATE CASCADE,
    PRIMARY KEY (personnel_fname, personnel_lname, show_title, show_year, role)
);

CREATE TABLE IF NOT EXISTS hasgenre (
    show_title TEXT NOT NULL,
    show_year INTEGER NOT NULL,
    genre_name TEXT NOT NULL REFERENCES genre (name) ON DELETE CASCADE ON UPDATE CASCADE,
    FOREIGN KEY (show_title, show_year) REFERENCES show (title, year) ON DELETE CASCADE ON UPDATE CASCADE,
    PRIMARY KEY (show_title, show_year, genre_name)
);
"#,
        roles = role_check_list()
    )
}

/// Generates SQL to drop all tables in reverse dependency order.
pub fn generate_drop_sql() -> &'static str {
    r#"
DROP TABLE IF EXISTS hasgenre;
DROP TABLE IF EXISTS participates;
DROP TABLE IF EXISTS genre;
DROP TABLE IF EXISTS show;
DROP TABLE IF EXISTS personnel;
"#
}

/// Enables foreign keys and creates any missing tables.
///
/// Safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(&generate_schema_sql())?;
    Ok(())
}

/// Drops every table.
pub fn drop_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(generate_drop_sql())?;
    Ok(())
}
