// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # ClickHouse Adapter
//!
//! Host-facing surface over [`clickhouse_catalog`]: a connection facade that
//! runs statements, builds and expands the catalog, and offers keyword
//! completions.
//!
//! ## Modules
//!
//! - [`config`]: connection settings from URLs, settings payloads or the environment
//! - [`connection`]: [`ClickHouseAdapter`] and the [`ClickHouseConnection`] facade
//! - [`cursor`]: rows of one query with an optional row limit
//! - [`completion`]: ClickHouse keyword suggestions
//! - [`logging`]: tracing subscriber setup
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clickhouse_adapter::ClickHouseAdapter;
//!
//! let adapter = ClickHouseAdapter::from_url("clickhouse://default@localhost:8123/default")?;
//! let mut connection = adapter.connect().await?;
//!
//! let mut catalog = connection.get_catalog().await?;
//! if let Some(database) = catalog.items_mut().first_mut() {
//!     let tables = connection.expand(database).await?;
//!     println!("{} tables", tables.len());
//! }
//!
//! if let Some(mut cursor) = connection.execute("SELECT 1").await? {
//!     println!("{:?}", cursor.fetch_all());
//! }
//! ```

pub mod completion;
pub mod config;
pub mod connection;
pub mod cursor;
pub mod logging;

// Re-exports
pub use clickhouse_catalog::{Catalog, CatalogError, CatalogNode, CatalogResult, NodeKind};
pub use completion::{Completion, keyword_completions};
pub use config::{ConfigError, ConnectionConfig};
pub use connection::{
    ClickHouseAdapter, ClickHouseConnection, DEFAULT_INIT_MESSAGE, SessionOptions,
};
pub use cursor::ClickHouseCursor;
