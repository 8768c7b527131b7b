// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Connection facade
//!
//! [`ClickHouseConnection`] owns one driver for the lifetime of a session and
//! exposes what the host application consumes: running statements, building
//! the catalog, expanding catalog nodes and keyword completions.
//!
//! Errors are split by phase. Anything failing inside [`ClickHouseConnection::open`]
//! is a `ConnectionFailed`; every later failure is a `QueryFailed` and leaves
//! the connection usable.

use clickhouse_catalog::{
    Catalog, CatalogBuilder, CatalogNode, CatalogResult, DatabaseFilter, Driver, MetadataQuerier,
    sql,
};
use tracing::{debug, info, warn};

use crate::completion::{Completion, keyword_completions};
use crate::config::ConnectionConfig;
use crate::cursor::ClickHouseCursor;

/// Greeting used when the configuration does not set one
pub const DEFAULT_INIT_MESSAGE: &str = "Welcome to ClickHouse";

/// Per-session settings that do not concern the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub init_message: String,
    /// Databases shown at the catalog root
    pub filter: DatabaseFilter,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            init_message: DEFAULT_INIT_MESSAGE.to_string(),
            filter: DatabaseFilter::default(),
        }
    }
}

/// An open ClickHouse session
pub struct ClickHouseConnection {
    driver: Box<dyn Driver>,
    options: SessionOptions,
}

impl std::fmt::Debug for ClickHouseConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickHouseConnection")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ClickHouseConnection {
    /// Open a session over `driver` with default options
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ConnectionFailed` if the liveness check fails.
    pub async fn open(driver: Box<dyn Driver>) -> CatalogResult<Self> {
        Self::open_with(driver, SessionOptions::default()).await
    }

    /// Open a session, checking the server answers `SELECT 1`
    ///
    /// On failure the driver is closed before the error is returned.
    pub async fn open_with(
        mut driver: Box<dyn Driver>,
        options: SessionOptions,
    ) -> CatalogResult<Self> {
        if let Err(e) = driver.query(sql::PING).await {
            warn!(error = %e, "Liveness check failed");
            if let Err(close_err) = driver.close().await {
                debug!(error = %close_err, "Failed to close driver after liveness check");
            }
            return Err(e.into_connection_error());
        }

        info!("Connected to ClickHouse");
        Ok(Self { driver, options })
    }

    /// Greeting shown by the host once connected
    pub fn init_message(&self) -> &str {
        &self.options.init_message
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Run one statement
    ///
    /// Returns `None` when the statement produces no row description, e.g. DDL
    /// or `INSERT`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::QueryFailed` if the server rejects the statement
    /// or the transport fails.
    pub async fn execute(&mut self, query: &str) -> CatalogResult<Option<ClickHouseCursor>> {
        debug!(sql = query, "Executing statement");
        let output = self
            .driver
            .query(query)
            .await
            .map_err(|e| e.into_query_error())?;
        Ok(ClickHouseCursor::from_output(output))
    }

    /// Build the root level of the catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::QueryFailed` if listing databases fails.
    pub async fn get_catalog(&mut self) -> CatalogResult<Catalog> {
        let builder = CatalogBuilder::new().with_filter(self.options.filter.clone());
        let mut querier = MetadataQuerier::new(self.driver.as_mut());
        builder.build(&mut querier).await
    }

    /// Children of `node`, querying the server on first expansion only
    pub async fn expand<'n>(
        &mut self,
        node: &'n mut CatalogNode,
    ) -> CatalogResult<&'n [CatalogNode]> {
        let mut querier = MetadataQuerier::new(self.driver.as_mut());
        node.fetch_children(&mut querier).await
    }

    /// Re-query the children of `node`, keeping the cache on failure
    pub async fn refresh<'n>(
        &mut self,
        node: &'n mut CatalogNode,
    ) -> CatalogResult<&'n [CatalogNode]> {
        let mut querier = MetadataQuerier::new(self.driver.as_mut());
        node.refresh(&mut querier).await
    }

    /// ClickHouse keywords for the host's autocompletion
    pub fn get_completions(&self) -> Vec<Completion> {
        keyword_completions()
    }

    /// Release the driver
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::QueryFailed` if the driver reports a shutdown
    /// failure. The driver is dropped either way.
    pub async fn close(mut self) -> CatalogResult<()> {
        self.driver.close().await.map_err(|e| e.into_query_error())?;
        info!("Connection closed");
        Ok(())
    }
}

/// Entry point creating sessions from a [`ConnectionConfig`]
#[derive(Debug, Clone, Default)]
pub struct ClickHouseAdapter {
    config: ConnectionConfig,
}

impl ClickHouseAdapter {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Adapter for a `clickhouse://` URL
    pub fn from_url(url: &str) -> CatalogResult<Self> {
        Ok(Self::new(ConnectionConfig::from_url(url)?))
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Validate the configuration and open a session over HTTP
    ///
    /// # Errors
    ///
    /// - `CatalogError::ConfigurationError` for an invalid configuration
    /// - `CatalogError::NotSupported` without the `http` feature
    /// - `CatalogError::ConnectionFailed` if the server cannot be reached
    pub async fn connect(&self) -> CatalogResult<ClickHouseConnection> {
        self.config.validate()?;
        let driver = create_driver(&self.config)?;
        info!(endpoint = %self.config.endpoint(), database = %self.config.database, "Connecting");
        self.connect_with(driver).await
    }

    /// Open a session over an already constructed driver
    ///
    /// Session options still come from the configuration.
    pub async fn connect_with(
        &self,
        driver: Box<dyn Driver>,
    ) -> CatalogResult<ClickHouseConnection> {
        ClickHouseConnection::open_with(driver, self.config.session_options()).await
    }
}

#[cfg(feature = "http")]
fn create_driver(config: &ConnectionConfig) -> CatalogResult<Box<dyn Driver>> {
    let driver = clickhouse_catalog::HttpDriver::new(config.driver_config())
        .map_err(|e| e.into_connection_error())?;
    Ok(Box::new(driver))
}

#[cfg(not(feature = "http"))]
fn create_driver(_config: &ConnectionConfig) -> CatalogResult<Box<dyn Driver>> {
    Err(clickhouse_catalog::CatalogError::NotSupported(
        "HTTP driver not compiled in. Enable the 'http' feature.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickhouse_catalog::CatalogError;

    #[test]
    fn test_default_session_options() {
        let options = SessionOptions::default();
        assert_eq!(options.init_message, "Welcome to ClickHouse");
        assert!(options.filter.is_database_visible("analytics"));
    }

    #[test]
    fn test_adapter_from_url() {
        let adapter = ClickHouseAdapter::from_url("clickhouse://ch1:9000/logs").unwrap();
        assert_eq!(adapter.config().host, "ch1");
        assert_eq!(adapter.config().database, "logs");

        let err = ClickHouseAdapter::from_url("postgres://x").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigurationError(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let adapter = ClickHouseAdapter::new(ConnectionConfig {
            port: Some(0),
            ..Default::default()
        });
        let err = adapter.connect().await.unwrap_err();
        assert!(matches!(err, CatalogError::ConfigurationError(_)));
    }
}
