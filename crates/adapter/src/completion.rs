// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Keyword completions
//!
//! ClickHouse-specific clauses and keywords offered to the host editor in
//! addition to its generic SQL vocabulary.

use serde::Serialize;

/// Type token shown next to keyword suggestions
pub const KEYWORD_TYPE_LABEL: &str = "kw";

/// Priority of keyword suggestions
pub const KEYWORD_PRIORITY: i32 = 1000;

const KEYWORDS: &[&str] = &[
    "ALTER TABLE",
    "ARRAY JOIN",
    "ASOF JOIN",
    "ATTACH",
    "CODEC",
    "CREATE DICTIONARY",
    "CREATE MATERIALIZED VIEW",
    "DETACH",
    "ENGINE",
    "EXCHANGE TABLES",
    "FINAL",
    "FORMAT",
    "GLOBAL IN",
    "GLOBAL JOIN",
    "INTERPOLATE",
    "LEFT ARRAY JOIN",
    "LIMIT BY",
    "LIVE VIEW",
    "MATERIALIZED",
    "ON CLUSTER",
    "OPTIMIZE TABLE",
    "ORDER BY",
    "PARTITION BY",
    "POPULATE",
    "PREWHERE",
    "PRIMARY KEY",
    "QUALIFY",
    "SAMPLE",
    "SAMPLE BY",
    "SETTINGS",
    "SHOW CREATE TABLE",
    "SHOW DATABASES",
    "SHOW TABLES",
    "SYSTEM",
    "TO",
    "TTL",
    "WITH FILL",
    "WITH TIES",
    "WITH TOTALS",
];

/// One suggestion handed to the host editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub label: String,
    pub type_label: String,
    /// Text inserted when the suggestion is accepted
    pub value: String,
    pub priority: i32,
    pub context: Option<String>,
}

impl Completion {
    /// A keyword suggestion inserting its own text
    pub fn keyword(keyword: &str) -> Self {
        let label = keyword.to_ascii_lowercase();
        Self {
            value: label.clone(),
            label,
            type_label: KEYWORD_TYPE_LABEL.to_string(),
            priority: KEYWORD_PRIORITY,
            context: None,
        }
    }
}

/// The static ClickHouse keyword list
pub fn keyword_completions() -> Vec<Completion> {
    KEYWORDS.iter().map(|kw| Completion::keyword(kw)).collect()
}
