// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for catalog operations
//!
//! Two error families exist: failures while a session is being established
//! ([`CatalogError::ConnectionFailed`]) and failures of a single statement on an
//! already open session ([`CatalogError::QueryFailed`]). The former is fatal to
//! the session attempt, the latter only aborts the current operation.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during catalog operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogError {
    /// Failed to establish the connection or its liveness check failed
    #[error("Failed to connect to ClickHouse: {0}")]
    ConnectionFailed(String),

    /// A statement failed on an established connection
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Invalid connection configuration
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    /// The requested capability is not compiled in
    #[error("Feature not supported: {0}")]
    NotSupported(String),
}

impl CatalogError {
    /// Whether this error ended the session attempt rather than a single operation
    pub fn is_connection_error(&self) -> bool {
        matches!(self, CatalogError::ConnectionFailed(_))
    }
}

/// Errors reported by a [`Driver`](crate::driver::Driver) implementation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// Network, IO or timeout failure before a response was received
    #[error("transport error: {0}")]
    Transport(String),

    /// The server rejected the statement
    #[error("{}", format_server_error(.code, .message))]
    Server { code: Option<u32>, message: String },

    /// The server answered with something that could not be decoded
    #[error("protocol error: {0}")]
    Protocol(String),
}

fn format_server_error(code: &Option<u32>, message: &str) -> String {
    match code {
        Some(code) => format!("server error (code {code}): {message}"),
        None => format!("server error: {message}"),
    }
}

impl DriverError {
    /// Convert into the error reported while opening a session
    pub fn into_connection_error(self) -> CatalogError {
        CatalogError::ConnectionFailed(self.to_string())
    }

    /// Convert into the error reported for a statement on an open session
    pub fn into_query_error(self) -> CatalogError {
        CatalogError::QueryFailed(self.to_string())
    }
}
