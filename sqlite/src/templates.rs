//! Row templates offered to the presentation layer.
//!
//! Insert templates describe one row per table with its parameterized
//! `INSERT` statement and sentinel-valued cells. Quick-search templates
//! carry a canned search statement whose placeholders cycle over the
//! template's cells.

use homeshow_core::{Cell, PersonnelRole, Row};

pub const PERSONNEL_INSERT: &str = "INSERT INTO personnel (first_name, last_name) VALUES (?, ?);";
pub const PARTICIPATES_INSERT: &str = "INSERT INTO participates (personnel_fname, personnel_lname, show_title, show_year, role) VALUES (?, ?, ?, ?, ?);";
pub const SHOW_INSERT: &str =
    "INSERT INTO show (title, year, duration, folder, is_movie) VALUES (?, ?, ?, ?, ?);";
pub const HASGENRE_INSERT: &str =
    "INSERT INTO hasgenre (show_title, show_year, genre_name) VALUES (?, ?, ?);";
pub const GENRE_INSERT: &str = "INSERT INTO genre (name) VALUES (?);";

/// Every person with the shows they took part in, plus a participation
/// count. Bound with (first_name, last_name, role) twice.
pub const SHOWS_BY_PERSONNEL: &str = "SELECT personnel.*, IFNULL (par_count, 0) AS show_count, role, show.* \
FROM personnel \
LEFT JOIN participates ON first_name=participates.personnel_fname AND last_name=participates.personnel_lname \
LEFT JOIN show ON show_title=title AND show_year=year \
LEFT JOIN (\
SELECT personnel_fname, personnel_lname, COUNT (*) AS par_count FROM participates \
WHERE personnel_fname LIKE ? AND personnel_lname LIKE ? AND IFNULL (role, 'N/A') LIKE ? \
GROUP BY personnel_fname, personnel_lname\
) AS count_table ON first_name=count_table.personnel_fname AND last_name=count_table.personnel_lname \
WHERE first_name LIKE ? AND last_name LIKE ? AND IFNULL (role, 'N/A') LIKE ? \
ORDER BY first_name, last_name, title, year;";

/// Every show with its personnel, plus a personnel count. Bound with
/// (title, year, role) twice; a negative year matches every year.
pub const PERSONNEL_BY_SHOWS: &str = "SELECT show.*, IFNULL (par_count, 0) AS personnel_count, personnel.*, role \
FROM show \
LEFT JOIN participates ON participates.show_title=title AND participates.show_year=year \
LEFT JOIN personnel ON first_name=personnel_fname AND last_name=personnel_lname \
LEFT JOIN (\
SELECT show_title, show_year, COUNT (*) AS par_count FROM participates \
WHERE show_title LIKE ? AND IFNULL(NULLIF(?, show_year), -1)<0 AND IFNULL (role, 'N/A') LIKE ? \
GROUP BY show_title, show_year\
) AS count_table ON title=count_table.show_title AND year=count_table.show_year \
WHERE title LIKE ? AND IFNULL(NULLIF(?, year), -1)<0 AND IFNULL (role, 'N/A') LIKE ? \
ORDER BY title, year, first_name, last_name;";

fn input(cell: Cell, is_key: bool) -> Cell {
    cell.with_key(is_key).with_live_search(true)
}

/// Returns one insert template per table, in join-chain order.
pub fn insert_templates() -> Vec<Row> {
    vec![
        Row::with_cells(
            "personnel",
            Some(PERSONNEL_INSERT),
            vec![
                input(Cell::text("first_name", "personnel", ""), true),
                input(Cell::text("last_name", "personnel", ""), true),
            ],
        ),
        Row::with_cells(
            "participates",
            Some(PARTICIPATES_INSERT),
            vec![
                input(Cell::text("personnel_fname", "participates", ""), true),
                input(Cell::text("personnel_lname", "participates", ""), true),
                input(Cell::text("show_title", "participates", ""), true),
                input(Cell::integer("show_year", "participates", -1), true),
                input(Cell::role("role", "participates", PersonnelRole::None), true),
            ],
        ),
        Row::with_cells(
            "show",
            Some(SHOW_INSERT),
            vec![
                input(Cell::text("title", "show", ""), true),
                input(Cell::integer("year", "show", -1), true),
                input(Cell::integer("duration", "show", -1), false),
                input(Cell::text("folder", "show", ""), false),
                input(Cell::boolean("is_movie", "show", None), false),
            ],
        ),
        Row::with_cells(
            "hasgenre",
            Some(HASGENRE_INSERT),
            vec![
                input(Cell::text("show_title", "hasgenre", ""), true),
                input(Cell::integer("show_year", "hasgenre", -1), true),
                input(Cell::text("genre_name", "hasgenre", ""), true),
            ],
        ),
        Row::with_cells(
            "genre",
            Some(GENRE_INSERT),
            vec![input(Cell::text("name", "genre", ""), true)],
        ),
    ]
}

/// Returns the quick-search templates. The row's table is the search's
/// display title.
pub fn quick_search_templates() -> Vec<Row> {
    vec![
        Row::with_cells(
            "All Shows By Personnel",
            Some(SHOWS_BY_PERSONNEL),
            vec![
                input(Cell::text("first_name", "personnel", ""), true),
                input(Cell::text("last_name", "personnel", ""), true),
                Cell::role("role", "participates", PersonnelRole::None).with_key(true),
            ],
        ),
        Row::with_cells(
            "All Personnel By Shows",
            Some(PERSONNEL_BY_SHOWS),
            vec![
                input(Cell::text("title", "show", ""), true),
                input(Cell::integer("year", "show", -1), true),
                Cell::role("role", "participates", PersonnelRole::None).with_key(true),
            ],
        ),
    ]
}
