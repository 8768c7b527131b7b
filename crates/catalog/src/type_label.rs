// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Short type tokens
//!
//! Maps server-reported column types and database/table engines to the compact
//! markers shown next to catalog nodes.
//!
//! Only the head name is looked up: everything from the first `(` or the first
//! space on is dropped, so `Decimal(18, 4)` becomes `Decimal` and
//! `Nullable(UInt8)` becomes `Nullable`. Wrappers are not unwrapped.

/// Token used for any name outside the vocabulary
pub const UNKNOWN_TYPE_LABEL: &str = "?";

/// Return the display token for a raw type or engine descriptor
///
/// # Examples
///
/// ```
/// use clickhouse_catalog::type_label::short_type;
///
/// assert_eq!(short_type("Decimal(10,2)"), "#.#");
/// assert_eq!(short_type("LowCardinality(String)"), "lc");
/// assert_eq!(short_type("MergeTree"), "?");
/// ```
pub fn short_type(raw: &str) -> &'static str {
    lookup(head_name(raw)).unwrap_or(UNKNOWN_TYPE_LABEL)
}

/// Head name of a descriptor: the text before the first `(` or space
pub fn head_name(raw: &str) -> &str {
    let end = raw.find(['(', ' ']).unwrap_or(raw.len());
    &raw[..end]
}

fn lookup(name: &str) -> Option<&'static str> {
    let token = match name {
        // Integers
        "UInt8" | "UInt16" | "UInt32" | "Int8" | "Int16" | "Int32" => "#",
        "UInt64" | "UInt128" | "UInt256" | "Int64" | "Int128" | "Int256" => "##",

        // Floating point and decimals
        "Float32" | "Float64" | "Decimal" => "#.#",

        "Boolean" => "t/f",

        // Strings
        "String" | "FixedString" => "s",

        // Date/Time
        "Date" | "Date32" => "d",
        "DateTime" | "DateTime64" => "ts",
        "Interval" => "|-|",

        // Semi-structured and composite
        "JSON" => "{}",
        "UUID" => "uid",
        "Enum" => "e",
        "LowCardinality" => "lc",
        "Array" => "[]",
        "Map" => "{}->{}",
        "SimpleAggregateFunction" => "saf",
        "AggregateFunction" => "af",
        "Nested" => "tbl",
        "Tuple" => "()",
        "Nullable" => "?",
        "IPv4" | "IPv6" => "ip",

        // Geo
        "Point" => "•",
        "Ring" => "○",
        "Polygon" => "▽",
        "MultiPolygon" => "▽▽",

        // Special
        "Expression" => "expr",
        "Set" => "set",
        "Nothing" => "nil",

        // Database engines
        "Atomic" => "atm",
        "Lazy" => "lz",
        "Replicated" => "rep",
        "PostgreSQL" => "pg",
        "MySQL" => "my",
        "SQLite" => "sq",
        "Backup" => "bak",
        "MaterializedPostgreSQL" => "mpg",
        "DataLakeCatalog" => "dlc",

        _ => return None,
    };
    Some(token)
}
