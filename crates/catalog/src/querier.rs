// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata querier
//!
//! Issues the three metadata queries over a borrowed [`Driver`] and returns the
//! rows as `(name, type_or_engine)` pairs in server order.
//!
//! A fetch either yields every row or fails as a whole; callers never see a
//! partially decoded result.

use serde_json::Value;
use tracing::{debug, trace};

use crate::driver::{Driver, Row};
use crate::error::{CatalogError, CatalogResult};
use crate::sql;

/// A `(name, type_or_engine)` pair as reported by the server
pub type NamedType = (String, String);

/// Runs metadata queries against one exclusively borrowed driver
pub struct MetadataQuerier<'a> {
    driver: &'a mut dyn Driver,
}

impl<'a> MetadataQuerier<'a> {
    /// Borrow `driver` for the duration of the querier
    pub fn new(driver: &'a mut dyn Driver) -> Self {
        Self { driver }
    }

    /// List every non-system database with its engine
    ///
    /// The system exclusion is applied to the returned rows as well as in the
    /// query.
    pub async fn list_databases(&mut self) -> CatalogResult<Vec<NamedType>> {
        let mut databases = self.fetch_pairs(sql::LIST_DATABASES).await?;
        databases.retain(|(name, _)| !sql::is_system_database(name));
        Ok(databases)
    }

    /// List the tables of exactly one database with their engines
    pub async fn list_tables(&mut self, database: &str) -> CatalogResult<Vec<NamedType>> {
        self.fetch_pairs(&sql::list_tables(database)).await
    }

    /// List the columns of one `database.table` with their types
    pub async fn list_columns(&mut self, table_identifier: &str) -> CatalogResult<Vec<NamedType>> {
        self.fetch_pairs(&sql::list_columns(table_identifier)).await
    }

    async fn fetch_pairs(&mut self, query: &str) -> CatalogResult<Vec<NamedType>> {
        debug!(sql = query, "Running metadata query");

        let output = self
            .driver
            .query(query)
            .await
            .map_err(|e| e.into_query_error())?;

        let pairs = output
            .rows
            .iter()
            .map(decode_pair)
            .collect::<CatalogResult<Vec<_>>>()?;

        trace!(rows = pairs.len(), "Metadata query finished");
        Ok(pairs)
    }
}

fn decode_pair(row: &Row) -> CatalogResult<NamedType> {
    match row.as_slice() {
        [Value::String(name), Value::String(kind)] => Ok((name.clone(), kind.clone())),
        _ => Err(CatalogError::QueryFailed(format!(
            "unexpected row shape in metadata result: {}",
            Value::Array(row.clone())
        ))),
    }
}
