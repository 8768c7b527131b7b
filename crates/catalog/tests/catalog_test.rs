// Copyright (c) 2025 ClickHouse Catalog Contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for catalog construction and lazy expansion

use clickhouse_adapter_test_utils::{CatalogAssertions, MockDriver, ServerFixtures};
use clickhouse_catalog::{
    Catalog, CatalogBuilder, CatalogError, CatalogResult, DatabaseFilter, DriverError,
    MetadataQuerier, NodeKind, sql,
};

async fn build_catalog(driver: &mut MockDriver) -> CatalogResult<Catalog> {
    let mut querier = MetadataQuerier::new(driver);
    CatalogBuilder::new().build(&mut querier).await
}

#[tokio::test]
async fn test_root_hides_system_databases() {
    let mut driver = ServerFixtures::analytics_server();
    let catalog = build_catalog(&mut driver).await.unwrap();

    assert_eq!(catalog.len(), 1);
    let analytics = &catalog.items()[0];
    assert_eq!(analytics.label, "analytics");
    CatalogAssertions::assert_node(analytics, NodeKind::Database, "analytics", "atm");
    assert!(!analytics.is_expanded());
}

#[tokio::test]
async fn test_root_keeps_server_order_and_labels_engines() {
    let mut driver = ServerFixtures::mixed_engines_server();
    let catalog = build_catalog(&mut driver).await.unwrap();

    let labels: Vec<_> = catalog.items().iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["default", "legacy", "mirror", "lake"]);

    let tokens: Vec<_> = catalog.items().iter().map(|n| n.type_label).collect();
    assert_eq!(tokens, vec!["atm", "lz", "pg", "?"]);

    for name in sql::SYSTEM_DATABASES {
        assert!(catalog.find(name).is_none());
    }
}

#[tokio::test]
async fn test_build_issues_only_the_databases_query() {
    let mut driver = ServerFixtures::analytics_server();
    build_catalog(&mut driver).await.unwrap();

    assert_eq!(driver.issued_queries(), vec![sql::LIST_DATABASES.to_string()]);
}

#[tokio::test]
async fn test_expand_database_yields_tables() {
    let mut driver = ServerFixtures::analytics_server();
    let handle = driver.clone();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);

    let analytics = &mut catalog.items_mut()[0];
    let tables = analytics.fetch_children(&mut querier).await.unwrap();

    assert_eq!(tables.len(), 2);
    CatalogAssertions::assert_node(&tables[0], NodeKind::Table, "analytics.events", "?");
    assert_eq!(tables[0].label, "events");
    assert_eq!(tables[0].query_name, "\"analytics\".\"events\"");
    CatalogAssertions::assert_node(&tables[1], NodeKind::Table, "analytics.daily", "?");
    CatalogAssertions::assert_children_qualified(analytics);

    assert_eq!(
        handle.count_issued(
            "SELECT name, engine FROM system.tables WHERE database = 'analytics'"
        ),
        1
    );
}

#[tokio::test]
async fn test_expand_twice_uses_cache() {
    let mut driver = ServerFixtures::analytics_server();
    let handle = driver.clone();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);

    let analytics = &mut catalog.items_mut()[0];
    let first = analytics.fetch_children(&mut querier).await.unwrap().to_vec();
    let second = analytics.fetch_children(&mut querier).await.unwrap().to_vec();

    assert_eq!(first, second);
    assert_eq!(handle.count_issued(&sql::list_tables("analytics")), 1);
}

#[tokio::test]
async fn test_refresh_requeries_and_replaces_cache() {
    let mut driver = ServerFixtures::analytics_server();
    let handle = driver.clone();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);

    let analytics = &mut catalog.items_mut()[0];
    analytics.fetch_children(&mut querier).await.unwrap();

    handle.add_table("analytics", "sessions", "ReplacingMergeTree");
    let refreshed = analytics.refresh(&mut querier).await.unwrap();

    let labels: Vec<_> = refreshed.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["events", "daily", "sessions"]);
    assert_eq!(handle.count_issued(&sql::list_tables("analytics")), 2);
}

#[tokio::test]
async fn test_failed_refresh_keeps_cached_children() {
    let mut driver = ServerFixtures::analytics_server();
    let handle = driver.clone();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);

    let analytics = &mut catalog.items_mut()[0];
    let before = analytics.fetch_children(&mut querier).await.unwrap().to_vec();

    handle.fail_on(
        "system.tables",
        DriverError::Transport("connection reset by peer".to_string()),
    );
    let err = analytics.refresh(&mut querier).await.unwrap_err();

    assert!(matches!(err, CatalogError::QueryFailed(ref msg) if msg.contains("connection reset")));
    assert!(analytics.is_expanded());
    assert_eq!(analytics.children().unwrap(), before.as_slice());
}

#[tokio::test]
async fn test_failed_first_expansion_leaves_node_unexpanded() {
    let mut driver = ServerFixtures::analytics_server().with_failure(
        "system.tables",
        DriverError::Server {
            code: Some(497),
            message: "Not enough privileges".to_string(),
        },
    );
    let handle = driver.clone();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);

    let analytics = &mut catalog.items_mut()[0];
    assert!(analytics.fetch_children(&mut querier).await.is_err());
    assert!(!analytics.is_expanded());

    handle.clear_failures();
    let tables = analytics.fetch_children(&mut querier).await.unwrap();
    assert_eq!(tables.len(), 2);
}

#[tokio::test]
async fn test_invalidate_forces_a_new_query() {
    let mut driver = ServerFixtures::analytics_server();
    let handle = driver.clone();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);

    let analytics = &mut catalog.items_mut()[0];
    analytics.fetch_children(&mut querier).await.unwrap();
    analytics.invalidate();
    assert!(!analytics.is_expanded());

    analytics.fetch_children(&mut querier).await.unwrap();
    assert_eq!(handle.count_issued(&sql::list_tables("analytics")), 2);
}

#[tokio::test]
async fn test_expand_table_yields_columns() {
    let mut driver = ServerFixtures::analytics_server();
    let handle = driver.clone();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);

    let analytics = &mut catalog.items_mut()[0];
    analytics.fetch_children(&mut querier).await.unwrap();

    let events = catalog.find_mut("analytics.events").unwrap();
    let columns = events.fetch_children(&mut querier).await.unwrap();

    let tokens: Vec<_> = columns.iter().map(|c| c.type_label).collect();
    assert_eq!(tokens, vec!["##", "#.#", "?", "[]"]);
    CatalogAssertions::assert_node(&columns[1], NodeKind::Column, "analytics.events.amount", "#.#");
    assert_eq!(columns[1].query_name, "\"amount\"");
    CatalogAssertions::assert_children_qualified(events);

    assert_eq!(
        handle.count_issued(
            "SELECT name, type FROM system.columns WHERE CONCAT(database, '.', table) = 'analytics.events'"
        ),
        1
    );
}

#[tokio::test]
async fn test_columns_are_leaves_and_never_query() {
    let mut driver = ServerFixtures::analytics_server();
    let handle = driver.clone();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);

    catalog.items_mut()[0]
        .fetch_children(&mut querier)
        .await
        .unwrap();
    catalog
        .find_mut("analytics.daily")
        .unwrap()
        .fetch_children(&mut querier)
        .await
        .unwrap();

    handle.clear_issued();
    let day = catalog.find_mut("analytics.daily.day").unwrap();
    assert!(day.is_leaf());
    assert!(day.fetch_children(&mut querier).await.unwrap().is_empty());
    assert!(day.refresh(&mut querier).await.unwrap().is_empty());
    assert!(handle.issued_queries().is_empty());
}

#[tokio::test]
async fn test_build_failure_produces_no_catalog() {
    let mut driver = ServerFixtures::analytics_server().with_failure(
        "system.databases",
        DriverError::Transport("broken pipe".to_string()),
    );

    let result = build_catalog(&mut driver).await;
    assert!(matches!(result, Err(CatalogError::QueryFailed(_))));
}

#[tokio::test]
async fn test_malformed_rows_fail_the_whole_fetch() {
    use clickhouse_catalog::{ColumnDescription, QueryOutput};
    use serde_json::json;

    let mut driver = MockDriver::new().with_result(
        sql::LIST_DATABASES,
        QueryOutput::with_rows(
            vec![
                ColumnDescription::new("name", "String"),
                ColumnDescription::new("engine", "String"),
            ],
            vec![
                vec![json!("analytics"), json!("Atomic")],
                vec![json!(42), json!("Atomic")],
            ],
        ),
    );

    let err = build_catalog(&mut driver).await.unwrap_err();
    assert!(err.to_string().contains("unexpected row shape"));
}

#[tokio::test]
async fn test_database_filter() {
    let mut driver = ServerFixtures::mixed_engines_server();
    let mut querier = MetadataQuerier::new(&mut driver);

    let filter = DatabaseFilter::new().hide_database("legacy");
    let catalog = CatalogBuilder::new()
        .with_filter(filter)
        .build(&mut querier)
        .await
        .unwrap();
    let labels: Vec<_> = catalog.items().iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["default", "mirror", "lake"]);

    // An allow-list cannot bring system databases back
    let filter = DatabaseFilter::new()
        .allow_database("system")
        .allow_database("default");
    let catalog = CatalogBuilder::new()
        .with_filter(filter)
        .build(&mut querier)
        .await
        .unwrap();
    let labels: Vec<_> = catalog.items().iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["default"]);
}

#[tokio::test]
async fn test_names_needing_quotes() {
    let mut driver = ServerFixtures::awkward_names_server();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);

    let db = &mut catalog.items_mut()[0];
    assert_eq!(db.query_name, "\"my db\"");
    db.fetch_children(&mut querier).await.unwrap();

    let order = catalog.find_mut("my db.order").unwrap();
    assert_eq!(order.query_name, "\"my db\".\"order\"");
    let columns = order.fetch_children(&mut querier).await.unwrap();
    assert_eq!(columns[0].qualified_identifier, "my db.order.select");
    assert_eq!(columns[0].query_name, "\"select\"");
}

#[tokio::test]
async fn test_catalog_serializes_for_the_host() {
    let mut driver = ServerFixtures::analytics_server();
    let mut catalog = build_catalog(&mut driver).await.unwrap();
    let mut querier = MetadataQuerier::new(&mut driver);
    catalog.items_mut()[0]
        .fetch_children(&mut querier)
        .await
        .unwrap();

    let json = serde_json::to_value(&catalog).unwrap();
    let db = &json["items"][0];
    assert_eq!(db["label"], "analytics");
    assert_eq!(db["children"][0]["qualified_identifier"], "analytics.events");
    assert!(db["children"][0]["children"].is_null());
}
