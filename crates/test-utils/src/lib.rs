// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for the ClickHouse catalog adapter
//!
//! This crate provides common testing components including:
//! - A mock driver simulating a server's `system.*` tables
//! - Failure injection and issued-query recording
//! - Catalog-specific assertions
//! - Test fixtures and sample server states

pub mod assertions;
pub mod fixtures;
pub mod mock_driver;

// Re-exports for convenience
pub use assertions::CatalogAssertions;
pub use fixtures::{ServerFixtures, SqlFixtures};
pub use mock_driver::MockDriver;
