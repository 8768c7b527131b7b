// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Result cursor
//!
//! A [`ClickHouseCursor`] holds the materialized rows of one query. It only
//! exists for statements that produced a row description; statements without
//! one never yield a cursor.

use std::collections::VecDeque;

use clickhouse_catalog::{ColumnDescription, QueryOutput, Row};
use serde_json::Value;

/// Rows of one query, consumed front to back
#[derive(Debug, Clone, PartialEq)]
pub struct ClickHouseCursor {
    columns: Vec<ColumnDescription>,
    rows: VecDeque<Row>,
    limit: Option<usize>,
    fetched: usize,
}

impl ClickHouseCursor {
    /// Wrap a query output, or `None` if it has no row description
    pub fn from_output(output: QueryOutput) -> Option<Self> {
        let columns = output.columns?;
        Some(Self {
            columns,
            rows: output.rows.into(),
            limit: None,
            fetched: 0,
        })
    }

    /// Column `(name, type)` pairs in result order
    pub fn columns(&self) -> Vec<(String, String)> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.type_name.clone()))
            .collect()
    }

    pub fn column_descriptions(&self) -> &[ColumnDescription] {
        &self.columns
    }

    /// Cap the number of rows this cursor hands out
    pub fn set_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Rows still available, honoring the limit
    pub fn row_count(&self) -> usize {
        match self.limit {
            Some(limit) => self.rows.len().min(limit.saturating_sub(self.fetched)),
            None => self.rows.len(),
        }
    }

    /// Take every remaining row, at most `limit` in total
    pub fn fetch_all(&mut self) -> Vec<Row> {
        let count = self.row_count();
        self.fetched += count;
        self.rows.drain(..count).collect()
    }

    /// Take the next row, or `None` once exhausted or the limit is reached
    pub fn fetch_one(&mut self) -> Option<Row> {
        if self.row_count() == 0 {
            return None;
        }
        self.fetched += 1;
        self.rows.pop_front()
    }
}

impl Iterator for ClickHouseCursor {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.fetch_one()
    }
}

/// Render a cell the way a table view shows it
///
/// Strings are printed without quotes and `null` as `NULL`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
