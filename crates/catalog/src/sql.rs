// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata SQL and identifier quoting
//!
//! The three metadata queries read ClickHouse's `system.databases`,
//! `system.tables` and `system.columns`. Their text is fixed; only the scoping
//! literal changes between calls.

/// Databases hidden from the catalog (exact, case-sensitive match)
pub const SYSTEM_DATABASES: [&str; 3] = ["INFORMATION_SCHEMA", "system", "information_schema"];

/// Liveness check issued when a session is opened
pub const PING: &str = "SELECT 1";

/// Lists every non-system database with its engine
pub const LIST_DATABASES: &str = "SELECT name, engine FROM system.databases WHERE name NOT IN ('INFORMATION_SCHEMA','system','information_schema')";

/// Separator between segments of a qualified identifier
pub const IDENTIFIER_SEPARATOR: char = '.';

/// Whether `name` is one of the hidden system databases
pub fn is_system_database(name: &str) -> bool {
    SYSTEM_DATABASES.contains(&name)
}

/// Lists the tables of exactly one database with their engines
pub fn list_tables(database: &str) -> String {
    format!(
        "SELECT name, engine FROM system.tables WHERE database = {}",
        quote_literal(database)
    )
}

/// Lists the columns of one table addressed as `database.table`
pub fn list_columns(table_identifier: &str) -> String {
    format!(
        "SELECT name, type FROM system.columns WHERE CONCAT(database, '.', table) = {}",
        quote_literal(table_identifier)
    )
}

/// Join a parent identifier and a child name: `parent.name`
pub fn qualify(parent: &str, name: &str) -> String {
    let mut qualified = String::with_capacity(parent.len() + name.len() + 1);
    qualified.push_str(parent);
    qualified.push(IDENTIFIER_SEPARATOR);
    qualified.push_str(name);
    qualified
}

/// Wrap a string in single quotes for use as a SQL literal
///
/// Backslashes and single quotes are backslash-escaped.
pub fn quote_literal(value: &str) -> String {
    quote_with(value, '\'')
}

/// Wrap a name in double quotes for use as a SQL identifier
///
/// Backslashes and double quotes are backslash-escaped.
pub fn quote_identifier(name: &str) -> String {
    quote_with(name, '"')
}

/// Quote every segment and join them: `"db"."table"`
pub fn quote_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .map(quote_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

fn quote_with(value: &str, quote: char) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push(quote);
    for c in value.chars() {
        if c == quote || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push(quote);
    quoted
}
