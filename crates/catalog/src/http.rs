// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # ClickHouse HTTP driver
//!
//! Talks to the ClickHouse HTTP interface (port 8123, or 8443 with TLS).
//!
//! Every statement is POSTed as the request body, authenticated with HTTP
//! basic auth, with `default_format=JSONCompactEachRowWithNamesAndTypes`, so
//! queries answer with one JSON array per line: column names, column types,
//! then the rows.
//! Statements without a result set answer with an empty body.
//!
//! The driver itself requires the `http` feature; response decoding is always
//! available.

use std::time::Duration;

use crate::driver::{ColumnDescription, DriverResult, QueryOutput, Row};
use crate::error::DriverError;

#[cfg(feature = "http")]
use crate::driver::Driver;
#[cfg(feature = "http")]
use async_trait::async_trait;
#[cfg(feature = "http")]
use reqwest::Client;
#[cfg(feature = "http")]
use tracing::debug;

/// Output format requested for statements without an explicit `FORMAT`
pub const OUTPUT_FORMAT: &str = "JSONCompactEachRowWithNamesAndTypes";

/// Request header selecting the database for unqualified names
pub const DATABASE_HEADER: &str = "X-ClickHouse-Database";

/// Response header carrying the numeric server exception code
pub const EXCEPTION_CODE_HEADER: &str = "X-ClickHouse-Exception-Code";

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default per-statement timeout in seconds
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 300;

/// Configuration for the HTTP driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpDriverConfig {
    /// Base URL, e.g. `http://localhost:8123`
    pub endpoint: String,
    pub user: String,
    pub password: String,
    /// Database used for unqualified names
    pub database: String,
    pub connect_timeout: Duration,
    /// Upper bound for one statement, including reading the response
    pub query_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpDriverConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8123".to_string(),
            user: "default".to_string(),
            password: String::new(),
            database: "default".to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            query_timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
            user_agent: format!("clickhouse-catalog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpDriverConfig {
    /// URL every statement is POSTed to
    pub fn query_url(&self) -> String {
        format!(
            "{}/?default_format={}",
            self.endpoint.trim_end_matches('/'),
            OUTPUT_FORMAT
        )
    }
}

/// Driver for the ClickHouse HTTP interface
#[cfg(feature = "http")]
#[derive(Debug)]
pub struct HttpDriver {
    client: Client,
    config: HttpDriverConfig,
    url: String,
}

#[cfg(feature = "http")]
impl HttpDriver {
    /// Create a driver; no request is sent until the first statement
    pub fn new(config: HttpDriverConfig) -> DriverResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.query_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| DriverError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.query_url(),
            config,
        })
    }

    /// Returns the driver configuration
    pub fn config(&self) -> &HttpDriverConfig {
        &self.config
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Driver for HttpDriver {
    async fn query(&mut self, sql: &str) -> DriverResult<QueryOutput> {
        debug!(url = %self.url, "POST statement");

        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .header(DATABASE_HEADER, &self.config.database)
            .body(sql.to_string())
            .send()
            .await
            .map_err(|e| DriverError::Transport(e.to_string()))?;

        let status = response.status();
        let code = response
            .headers()
            .get(EXCEPTION_CODE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| DriverError::Transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(DriverError::Server {
                code,
                message: body.trim().to_string(),
            });
        }

        parse_compact_output(&body)
    }
}

/// Decode a `JSONCompactEachRowWithNamesAndTypes` response body
///
/// An empty body means the statement produced no result set.
pub fn parse_compact_output(body: &str) -> DriverResult<QueryOutput> {
    let mut lines = body.lines().filter(|line| !line.trim().is_empty());

    let Some(names_line) = lines.next() else {
        return Ok(QueryOutput::no_result_set());
    };
    let names: Vec<String> = parse_line(names_line, "column names")?;

    let types_line = lines
        .next()
        .ok_or_else(|| DriverError::Protocol("missing column types line".to_string()))?;
    let types: Vec<String> = parse_line(types_line, "column types")?;

    if names.len() != types.len() {
        return Err(DriverError::Protocol(format!(
            "{} column names but {} column types",
            names.len(),
            types.len()
        )));
    }

    let rows = lines
        .map(|line| {
            let row: Row = parse_line(line, "row")?;
            if row.len() == names.len() {
                Ok(row)
            } else {
                Err(DriverError::Protocol(format!(
                    "row has {} values, expected {}",
                    row.len(),
                    names.len()
                )))
            }
        })
        .collect::<DriverResult<Vec<_>>>()?;

    let columns = names
        .into_iter()
        .zip(types)
        .map(|(name, type_name)| ColumnDescription { name, type_name })
        .collect();

    Ok(QueryOutput::with_rows(columns, rows))
}

fn parse_line<T: serde::de::DeserializeOwned>(line: &str, what: &str) -> DriverResult<T> {
    serde_json::from_str(line).map_err(|e| {
        let preview: String = line.chars().take(80).collect();
        DriverError::Protocol(format!("invalid {what} line ({e}): {preview}"))
    })
}
