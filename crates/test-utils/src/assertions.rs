// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Catalog-specific test helpers and custom assertions

use clickhouse_catalog::{CatalogNode, NodeKind, sql};

/// Custom assertion helpers for catalog testing
pub struct CatalogAssertions;

impl CatalogAssertions {
    /// Assert a node's kind, identifier and type token
    pub fn assert_node(
        node: &CatalogNode,
        kind: NodeKind,
        qualified_identifier: &str,
        type_label: &str,
    ) {
        assert_eq!(
            node.kind, kind,
            "Node kind mismatch for '{}'",
            node.qualified_identifier
        );
        assert_eq!(
            node.qualified_identifier, qualified_identifier,
            "Qualified identifier mismatch"
        );
        assert_eq!(
            node.type_label, type_label,
            "Type label mismatch for '{}'",
            node.qualified_identifier
        );
    }

    /// Assert that every child identifier is `parent.child_label`
    pub fn assert_children_qualified(parent: &CatalogNode) {
        let children = parent.children().unwrap_or_else(|| {
            panic!("Expected '{}' to be expanded", parent.qualified_identifier)
        });
        for child in children {
            assert_eq!(
                child.qualified_identifier,
                sql::qualify(&parent.qualified_identifier, &child.label),
                "Child identifier is not derived from its parent"
            );
        }
    }

    /// Labels of the cached children, in order
    pub fn child_labels(node: &CatalogNode) -> Vec<&str> {
        node.children()
            .unwrap_or_default()
            .iter()
            .map(|c| c.label.as_str())
            .collect()
    }
}
