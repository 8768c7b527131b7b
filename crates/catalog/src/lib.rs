// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # ClickHouse Catalog
//!
//! This crate turns ClickHouse's flat `system.*` metadata tables into a lazily
//! expanded tree of databases, tables and columns.
//!
//! ## Architecture
//!
//! - [`type_label`]: maps type and engine descriptors to short display tokens
//! - [`sql`]: the fixed metadata queries and identifier quoting
//! - [`Driver`]: the seam to the wire protocol (one statement at a time)
//! - [`MetadataQuerier`]: runs the metadata queries over a borrowed driver
//! - [`CatalogNode`]: one tree node with a cached, on-demand child fetch
//! - [`CatalogBuilder`]: produces the root level of database nodes
//! - [`http`]: a driver for the ClickHouse HTTP interface (feature `http`)
//!
//! Only the root level is queried when the catalog is built. Each further level
//! is queried the first time its parent is expanded and cached afterwards.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clickhouse_catalog::{CatalogBuilder, MetadataQuerier};
//!
//! let mut querier = MetadataQuerier::new(&mut driver);
//! let mut catalog = CatalogBuilder::new().build(&mut querier).await?;
//!
//! for database in catalog.items_mut() {
//!     for table in database.fetch_children(&mut querier).await? {
//!         println!("{} [{}]", table.qualified_identifier, table.type_label);
//!     }
//! }
//! ```

pub mod builder;
pub mod driver;
pub mod error;
pub mod http;
pub mod node;
pub mod querier;
pub mod sql;
pub mod type_label;

// Re-exports
pub use builder::{Catalog, CatalogBuilder, DatabaseFilter};
pub use driver::{ColumnDescription, Driver, DriverResult, QueryOutput, Row};
pub use error::{CatalogError, CatalogResult, DriverError};
pub use http::HttpDriverConfig;
#[cfg(feature = "http")]
pub use http::HttpDriver;
pub use node::{CatalogNode, NodeKind};
pub use querier::{MetadataQuerier, NamedType};
pub use type_label::{UNKNOWN_TYPE_LABEL, short_type};
