// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog nodes
//!
//! A [`CatalogNode`] is one entry of the catalog tree: a database, a table or a
//! column. All three share the same fields; what differs is how children are
//! fetched, which is selected by matching on [`NodeKind`].
//!
//! ## Lifecycle
//!
//! ```text
//! Unexpanded --fetch_children--> Expanded (children cached)
//!     ^                               |
//!     +---------- invalidate ---------+
//! ```
//!
//! `fetch_children` queries the server only while the node is unexpanded.
//! `refresh` re-queries unconditionally and swaps the cache only on success,
//! so a failed refresh keeps whatever was cached before.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CatalogResult;
use crate::querier::MetadataQuerier;
use crate::sql;
use crate::type_label::short_type;

/// Which level of the catalog a node lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Database,
    Table,
    Column,
}

/// One node of the catalog tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogNode {
    /// Level of the node
    pub kind: NodeKind,
    /// Dotted path addressing the node within the server (`db.table.column`)
    pub qualified_identifier: String,
    /// Quoted form for inserting the node into SQL text
    pub query_name: String,
    /// Unquoted display name
    pub label: String,
    /// Short type or engine marker
    pub type_label: &'static str,
    /// `None` while unexpanded
    children: Option<Vec<CatalogNode>>,
}

impl CatalogNode {
    /// Database node for `name` with the given database engine
    pub fn database(name: impl Into<String>, engine: &str) -> Self {
        let name = name.into();
        Self {
            kind: NodeKind::Database,
            query_name: sql::quote_identifier(&name),
            qualified_identifier: name.clone(),
            label: name,
            type_label: short_type(engine),
            children: None,
        }
    }

    /// Table node `name` inside the database identified by `database`
    pub fn table(database: &str, name: impl Into<String>, engine: &str) -> Self {
        let name = name.into();
        Self {
            kind: NodeKind::Table,
            qualified_identifier: sql::qualify(database, &name),
            query_name: sql::quote_path([database, name.as_str()]),
            label: name,
            type_label: short_type(engine),
            children: None,
        }
    }

    /// Column node `name` inside the table identified by `table`
    pub fn column(table: &str, name: impl Into<String>, data_type: &str) -> Self {
        let name = name.into();
        Self {
            kind: NodeKind::Column,
            qualified_identifier: sql::qualify(table, &name),
            query_name: sql::quote_identifier(&name),
            label: name,
            type_label: short_type(data_type),
            children: None,
        }
    }

    /// Whether children have been fetched and cached
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    /// Columns never have children
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Column
    }

    /// Cached children, `None` while unexpanded
    pub fn children(&self) -> Option<&[CatalogNode]> {
        self.children.as_deref()
    }

    /// Mutable access to cached children, `None` while unexpanded
    pub fn children_mut(&mut self) -> Option<&mut [CatalogNode]> {
        self.children.as_deref_mut()
    }

    /// Return the children, querying the server only on first expansion
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::QueryFailed` if the metadata query fails. The node
    /// stays unexpanded in that case.
    pub async fn fetch_children(
        &mut self,
        querier: &mut MetadataQuerier<'_>,
    ) -> CatalogResult<&[CatalogNode]> {
        if self.children.is_none() {
            let loaded = self.load_children(querier).await?;
            self.children = Some(loaded);
        }
        Ok(self.children.as_deref().unwrap_or_default())
    }

    /// Re-query the children and replace the cache
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::QueryFailed` if the metadata query fails. The
    /// previously cached children, if any, are kept.
    pub async fn refresh(
        &mut self,
        querier: &mut MetadataQuerier<'_>,
    ) -> CatalogResult<&[CatalogNode]> {
        let result = self.load_children(querier).await;
        match result {
            Ok(loaded) => {
                self.children = Some(loaded);
                Ok(self.children.as_deref().unwrap_or_default())
            }
            Err(e) => {
                warn!(node = %self.qualified_identifier, error = %e, "Refresh failed, keeping cached children");
                Err(e)
            }
        }
    }

    /// Drop cached children so the next fetch queries again
    pub fn invalidate(&mut self) {
        self.children = None;
    }

    /// Find a materialized descendant (or this node) by qualified identifier
    pub fn find(&self, qualified_identifier: &str) -> Option<&CatalogNode> {
        if self.qualified_identifier == qualified_identifier {
            return Some(self);
        }
        if !is_within(qualified_identifier, &self.qualified_identifier) {
            return None;
        }
        self.children()?
            .iter()
            .find_map(|child| child.find(qualified_identifier))
    }

    /// Mutable variant of [`CatalogNode::find`]
    pub fn find_mut(&mut self, qualified_identifier: &str) -> Option<&mut CatalogNode> {
        if self.qualified_identifier == qualified_identifier {
            return Some(self);
        }
        if !is_within(qualified_identifier, &self.qualified_identifier) {
            return None;
        }
        self.children_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(qualified_identifier))
    }

    async fn load_children(
        &self,
        querier: &mut MetadataQuerier<'_>,
    ) -> CatalogResult<Vec<CatalogNode>> {
        let parent = self.qualified_identifier.as_str();
        let children = match self.kind {
            NodeKind::Database => querier
                .list_tables(parent)
                .await?
                .into_iter()
                .map(|(name, engine)| CatalogNode::table(parent, name, &engine))
                .collect::<Vec<_>>(),
            NodeKind::Table => querier
                .list_columns(parent)
                .await?
                .into_iter()
                .map(|(name, data_type)| CatalogNode::column(parent, name, &data_type))
                .collect(),
            NodeKind::Column => Vec::new(),
        };

        debug!(node = parent, children = children.len(), "Fetched catalog children");
        Ok(children)
    }
}

/// Whether `identifier` can live below `ancestor` in the tree
fn is_within(identifier: &str, ancestor: &str) -> bool {
    identifier
        .strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with(sql::IDENTIFIER_SEPARATOR))
}
