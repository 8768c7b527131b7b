// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: sample server states and statements

use clickhouse_catalog::{ColumnDescription, QueryOutput};
use serde_json::json;

use crate::mock_driver::MockDriver;

/// Sample server states
pub struct ServerFixtures;

impl ServerFixtures {
    /// One user database next to the system database
    ///
    /// `analytics` (Atomic) holds `events` (MergeTree) with four columns and
    /// `daily` (View) with two. `system` is reported by the server and must be
    /// hidden by the catalog.
    pub fn analytics_server() -> MockDriver {
        MockDriver::new()
            .with_database("analytics", "Atomic")
            .with_database("system", "Atomic")
            .with_table("analytics", "events", "MergeTree")
            .with_table("analytics", "daily", "View")
            .with_column("analytics", "events", "id", "UInt64")
            .with_column("analytics", "events", "amount", "Decimal(18, 4)")
            .with_column("analytics", "events", "user", "Nullable(String)")
            .with_column("analytics", "events", "tags", "Array(LowCardinality(String))")
            .with_column("analytics", "daily", "day", "Date")
            .with_column("analytics", "daily", "total", "Float64")
    }

    /// Several databases with different engines, including every system name
    pub fn mixed_engines_server() -> MockDriver {
        MockDriver::new()
            .with_database("INFORMATION_SCHEMA", "Memory")
            .with_database("default", "Atomic")
            .with_database("information_schema", "Memory")
            .with_database("legacy", "Lazy(3600)")
            .with_database("mirror", "PostgreSQL('pg:5432', 'app', 'reader', '')")
            .with_database("system", "Atomic")
            .with_database("lake", "SomeFutureEngine")
    }

    /// A server whose database names need quoting
    pub fn awkward_names_server() -> MockDriver {
        MockDriver::new()
            .with_database("my db", "Atomic")
            .with_table("my db", "order", "Log")
            .with_column("my db", "order", "select", "String")
    }
}

/// Sample statements and their scripted outputs
pub struct SqlFixtures;

impl SqlFixtures {
    /// A query returning two rows
    pub const fn select_numbers() -> &'static str {
        "SELECT number, toString(number) AS label FROM system.numbers LIMIT 2"
    }

    /// Output for [`SqlFixtures::select_numbers`]
    pub fn select_numbers_output() -> QueryOutput {
        QueryOutput::with_rows(
            vec![
                ColumnDescription::new("number", "UInt64"),
                ColumnDescription::new("label", "String"),
            ],
            vec![vec![json!("0"), json!("0")], vec![json!("1"), json!("1")]],
        )
    }

    /// A DDL statement without a result set
    pub const fn create_table() -> &'static str {
        "CREATE TABLE analytics.tmp (x UInt8) ENGINE = Memory"
    }

    /// An insert without a result set
    pub const fn insert() -> &'static str {
        "INSERT INTO analytics.tmp VALUES (1)"
    }
}
