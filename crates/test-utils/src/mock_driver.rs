// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock driver implementation for testing
//!
//! Simulates the parts of a ClickHouse server the catalog reads: the
//! `system.databases`, `system.tables` and `system.columns` tables. Other
//! statements are answered from scripted results.
//!
//! `MockDriver` is a cheap handle over shared state: clone it before handing
//! it to a connection and keep the clone to change the server state, inject
//! failures, or inspect the statements that were issued.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use clickhouse_catalog::{
    ColumnDescription, Driver, DriverError, DriverResult, QueryOutput, sql,
};
use serde_json::{Value, json};

const TABLES_QUERY_PREFIX: &str = "SELECT name, engine FROM system.tables WHERE ";
const COLUMNS_QUERY_PREFIX: &str = "SELECT name, type FROM system.columns WHERE ";

#[derive(Debug, Default)]
struct MockState {
    databases: Vec<(String, String)>,
    tables: Vec<(String, String, String)>,
    columns: Vec<(String, String, String, String)>,
    results: Vec<(String, QueryOutput)>,
    failures: Vec<(String, DriverError)>,
    issued: Vec<String>,
    closed: bool,
}

/// In-memory driver for testing
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    /// Create a server with no databases
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a database (system names are not filtered by the mock)
    pub fn with_database(self, name: &str, engine: &str) -> Self {
        self.add_database(name, engine);
        self
    }

    /// Add a table to a database
    pub fn with_table(self, database: &str, name: &str, engine: &str) -> Self {
        self.add_table(database, name, engine);
        self
    }

    /// Add a column to a table
    pub fn with_column(self, database: &str, table: &str, name: &str, data_type: &str) -> Self {
        self.add_column(database, table, name, data_type);
        self
    }

    /// Answer `sql` (exact text) with `output`
    pub fn with_result(self, sql: &str, output: QueryOutput) -> Self {
        self.state().results.push((sql.to_string(), output));
        self
    }

    /// Fail every statement containing `pattern`
    pub fn with_failure(self, pattern: &str, error: DriverError) -> Self {
        self.fail_on(pattern, error);
        self
    }

    pub fn add_database(&self, name: &str, engine: &str) {
        self.state()
            .databases
            .push((name.to_string(), engine.to_string()));
    }

    pub fn add_table(&self, database: &str, name: &str, engine: &str) {
        self.state()
            .tables
            .push((database.to_string(), name.to_string(), engine.to_string()));
    }

    pub fn add_column(&self, database: &str, table: &str, name: &str, data_type: &str) {
        self.state().columns.push((
            database.to_string(),
            table.to_string(),
            name.to_string(),
            data_type.to_string(),
        ));
    }

    /// Remove a table and its columns
    pub fn remove_table(&self, database: &str, name: &str) {
        let mut state = self.state();
        state.tables.retain(|(db, t, _)| !(db == database && t == name));
        state
            .columns
            .retain(|(db, t, _, _)| !(db == database && t == name));
    }

    /// Fail every statement containing `pattern`
    pub fn fail_on(&self, pattern: &str, error: DriverError) {
        self.state().failures.push((pattern.to_string(), error));
    }

    /// Remove all injected failures
    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    /// Every statement received so far, in order
    pub fn issued_queries(&self) -> Vec<String> {
        self.state().issued.clone()
    }

    /// Number of received statements containing `pattern`
    pub fn count_issued(&self, pattern: &str) -> usize {
        self.state()
            .issued
            .iter()
            .filter(|sql| sql.contains(pattern))
            .count()
    }

    /// Forget the recorded statements
    pub fn clear_issued(&self) {
        self.state().issued.clear();
    }

    /// Whether `close` was called
    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond(&self, query: &str) -> DriverResult<QueryOutput> {
        let mut state = self.state();
        state.issued.push(query.to_string());

        if state.closed {
            return Err(DriverError::Transport("connection is closed".to_string()));
        }

        if let Some((_, error)) = state
            .failures
            .iter()
            .find(|(pattern, _)| query.contains(pattern.as_str()))
        {
            return Err(error.clone());
        }

        if let Some((_, output)) = state.results.iter().find(|(scripted, _)| scripted == query) {
            return Ok(output.clone());
        }

        if query == sql::PING {
            return Ok(QueryOutput::with_rows(
                vec![ColumnDescription::new("1", "UInt8")],
                vec![vec![json!(1)]],
            ));
        }

        if query == sql::LIST_DATABASES {
            return Ok(pairs_output(
                "engine",
                state.databases.iter().map(|(n, e)| (n.as_str(), e.as_str())),
            ));
        }

        if query.starts_with(TABLES_QUERY_PREFIX) {
            let rows = state
                .tables
                .iter()
                .filter(|(db, _, _)| sql::list_tables(db) == query)
                .map(|(_, name, engine)| (name.as_str(), engine.as_str()));
            return Ok(pairs_output("engine", rows));
        }

        if query.starts_with(COLUMNS_QUERY_PREFIX) {
            let rows = state
                .columns
                .iter()
                .filter(|(db, table, _, _)| sql::list_columns(&sql::qualify(db, table)) == query)
                .map(|(_, _, name, data_type)| (name.as_str(), data_type.as_str()));
            return Ok(pairs_output("type", rows));
        }

        if returns_rows(query) {
            return Err(DriverError::Server {
                code: Some(60),
                message: format!("mock has no scripted result for: {query}"),
            });
        }

        Ok(QueryOutput::no_result_set())
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn query(&mut self, sql: &str) -> DriverResult<QueryOutput> {
        self.respond(sql)
    }

    async fn close(&mut self) -> DriverResult<()> {
        self.state().closed = true;
        Ok(())
    }
}

fn pairs_output<'a>(
    second_column: &str,
    rows: impl Iterator<Item = (&'a str, &'a str)>,
) -> QueryOutput {
    QueryOutput::with_rows(
        vec![
            ColumnDescription::new("name", "String"),
            ColumnDescription::new(second_column, "String"),
        ],
        rows.map(|(a, b)| vec![Value::from(a), Value::from(b)])
            .collect(),
    )
}

fn returns_rows(query: &str) -> bool {
    let head = query
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();
    matches!(
        head.as_str(),
        "SELECT" | "WITH" | "SHOW" | "DESCRIBE" | "DESC" | "EXISTS" | "EXPLAIN"
    )
}
