// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog construction
//!
//! [`CatalogBuilder`] produces the root level of the tree: one unexpanded
//! database node per visible database. Tables and columns are fetched later,
//! one level at a time, when the host expands a node.

use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use crate::error::CatalogResult;
use crate::node::CatalogNode;
use crate::querier::MetadataQuerier;

/// Which databases are shown at the root of the catalog
///
/// System databases are always hidden, regardless of the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseFilter {
    /// Databases to show; if empty, all databases are shown
    pub allowed_databases: HashSet<String>,

    /// Databases to hide in addition to the system ones
    pub hidden_databases: HashSet<String>,
}

impl DatabaseFilter {
    /// Create a filter that shows every non-system database
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allowed database
    pub fn allow_database(mut self, name: impl Into<String>) -> Self {
        self.allowed_databases.insert(name.into());
        self
    }

    /// Add a hidden database
    pub fn hide_database(mut self, name: impl Into<String>) -> Self {
        self.hidden_databases.insert(name.into());
        self
    }

    /// Check if a database is shown
    pub fn is_database_visible(&self, name: &str) -> bool {
        if self.hidden_databases.contains(name) {
            return false;
        }
        self.allowed_databases.is_empty() || self.allowed_databases.contains(name)
    }
}

/// Root of the catalog tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    items: Vec<CatalogNode>,
}

impl Catalog {
    /// Wrap an ordered sequence of root nodes
    pub fn new(items: Vec<CatalogNode>) -> Self {
        Self { items }
    }

    /// Root nodes in server order
    pub fn items(&self) -> &[CatalogNode] {
        &self.items
    }

    /// Mutable root nodes, for expanding them in place
    pub fn items_mut(&mut self) -> &mut [CatalogNode] {
        &mut self.items
    }

    /// Consume the catalog and return its root nodes
    pub fn into_items(self) -> Vec<CatalogNode> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an already materialized node by qualified identifier
    ///
    /// Never queries the server: nodes below unexpanded parents are not found.
    pub fn find(&self, qualified_identifier: &str) -> Option<&CatalogNode> {
        self.items
            .iter()
            .find_map(|item| item.find(qualified_identifier))
    }

    /// Mutable variant of [`Catalog::find`]
    pub fn find_mut(&mut self, qualified_identifier: &str) -> Option<&mut CatalogNode> {
        self.items
            .iter_mut()
            .find_map(|item| item.find_mut(qualified_identifier))
    }
}

/// Builds the root level of the catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    filter: DatabaseFilter,
}

impl CatalogBuilder {
    /// Builder showing every non-system database
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the databases shown at the root
    pub fn with_filter(mut self, filter: DatabaseFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Query the databases and produce unexpanded database nodes
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::QueryFailed` if listing databases fails. No
    /// partial catalog is produced in that case.
    pub async fn build(&self, querier: &mut MetadataQuerier<'_>) -> CatalogResult<Catalog> {
        let items = querier
            .list_databases()
            .await?
            .into_iter()
            .filter(|(name, _)| self.filter.is_database_visible(name))
            .map(|(name, engine)| CatalogNode::database(name, &engine))
            .collect::<Vec<_>>();

        info!(databases = items.len(), "Catalog built");
        Ok(Catalog::new(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_shows_everything() {
        let filter = DatabaseFilter::new();
        assert!(filter.is_database_visible("analytics"));
        assert!(filter.is_database_visible("default"));
    }

    #[test]
    fn test_filter_allow_list() {
        let filter = DatabaseFilter::new().allow_database("analytics");
        assert!(filter.is_database_visible("analytics"));
        assert!(!filter.is_database_visible("default"));
    }

    #[test]
    fn test_hidden_wins_over_allowed() {
        let filter = DatabaseFilter::new()
            .allow_database("analytics")
            .hide_database("analytics");
        assert!(!filter.is_database_visible("analytics"));
    }

    #[test]
    fn test_catalog_find() {
        let catalog = Catalog::new(vec![
            CatalogNode::database("analytics", "Atomic"),
            CatalogNode::database("default", "Atomic"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(
            catalog.find("default").map(|n| n.label.as_str()),
            Some("default")
        );
        assert!(catalog.find("missing").is_none());
    }
}
