// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Driver seam
//!
//! The wire protocol is not part of this crate's core. Everything that talks to
//! a server goes through the [`Driver`] trait, which runs one statement at a time
//! and hands back a fully materialized [`QueryOutput`].
//!
//! `query` takes `&mut self`: a driver connection serves exactly one in-flight
//! statement. Independent subtrees can be expanded concurrently only by giving
//! each task its own driver.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::DriverError;

/// Result type alias for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// A single result row, one JSON value per column
pub type Row = Vec<Value>;

/// Name and server-reported type of a result column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnDescription {
    pub name: String,
    pub type_name: String,
}

impl ColumnDescription {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Materialized outcome of one statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    /// Row description, `None` when the statement produces no result set
    pub columns: Option<Vec<ColumnDescription>>,
    /// Rows in server order
    pub rows: Vec<Row>,
}

impl QueryOutput {
    /// Output of a statement without a result set (DDL, INSERT, SET, ...)
    pub fn no_result_set() -> Self {
        Self::default()
    }

    /// Output of a query with the given row description and rows
    pub fn with_rows(columns: Vec<ColumnDescription>, rows: Vec<Row>) -> Self {
        Self {
            columns: Some(columns),
            rows,
        }
    }

    /// Whether the statement produced a row description
    pub fn has_result_set(&self) -> bool {
        self.columns.is_some()
    }
}

/// Connection to a ClickHouse server
///
/// Implementations own the underlying transport. Dropping a driver must
/// release it; [`Driver::close`] exists for callers that want to observe
/// shutdown errors.
#[async_trait]
pub trait Driver: Send {
    /// Run one statement and return its complete output
    ///
    /// # Errors
    ///
    /// Returns `DriverError::Transport` if the server could not be reached.
    /// Returns `DriverError::Server` if the server rejected the statement.
    /// Returns `DriverError::Protocol` if the response could not be decoded.
    async fn query(&mut self, sql: &str) -> DriverResult<QueryOutput>;

    /// Release the connection
    async fn close(&mut self) -> DriverResult<()> {
        Ok(())
    }
}
