// Copyright (c) 2025 - Cowboy AI, Inc.
//! Locality guard
//!
//! Server nodes recorded in another datacenter only get warnings until
//! inter-DC mode is enabled.

mod fixtures;

use test_case::test_case;

use cim_asset_sync::adapters::InMemoryInventory;
use cim_asset_sync::domain::Asset;
use cim_asset_sync::{AssetQuery, AssetTag, AttributeUpdate};
use fixtures::*;

#[tokio::test]
async fn test_remote_server_node_only_warns() {
    let (ctx, sink) = context();

    ctx.set(
        &remote_server(),
        AttributeUpdate::new()
            .with("primary_role", "master")
            .with("status", "MAINTENANCE")
            .with("state", "RUNNING"),
    )
    .await
    .unwrap();

    assert!(ctx.client().writes().is_empty());
    pretty_assertions::assert_eq!(
        sink.notices(),
        vec![
            "db9.dc2: WARNING: unable to set Collins attribute PRIMARY_ROLE to MASTER".to_string(),
            "db9.dc2: WARNING: unable to set Collins status to MAINTENANCE".to_string(),
            "db9.dc2: WARNING: unable to set Collins state to RUNNING".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_inter_dc_mode_lets_the_write_through() {
    let (ctx, sink) = context();
    let update = AttributeUpdate::new().with("primary_role", "master");

    ctx.set(&remote_server(), update.clone()).await.unwrap();
    assert!(ctx.client().writes().is_empty());

    ctx.enable_inter_dc_mode();
    sink.clear();
    ctx.set(&remote_server(), update).await.unwrap();

    pretty_assertions::assert_eq!(ctx.client().writes().len(), 1);
    pretty_assertions::assert_eq!(
        sink.notices(),
        vec!["db9.dc2: Collins attribute PRIMARY_ROLE set to MASTER".to_string()]
    );
}

#[tokio::test]
async fn test_explicit_remote_asset_is_guarded_too() {
    let (ctx, sink) = context();

    ctx.set(
        &AssetTag::new(LOCAL_TAG),
        AttributeUpdate::new()
            .with_asset(remote_server_asset())
            .with("pool", "posts"),
    )
    .await
    .unwrap();

    assert!(ctx.client().writes().is_empty());
    pretty_assertions::assert_eq!(sink.warnings().len(), 1);
}

#[tokio::test]
async fn test_unknown_datacenter_guards_every_placed_server_node() {
    let (ctx, sink) = context_with(seeded_inventory(), None);
    pretty_assertions::assert_eq!(ctx.current_datacenter(), "UNKNOWN-DC");

    ctx.set(&local_server(), AttributeUpdate::new().with("pool", "posts"))
        .await
        .unwrap();

    assert!(ctx.client().writes().is_empty());
    pretty_assertions::assert_eq!(sink.warnings().len(), 1);
}

#[test_case("SERVER_NODE", Some("dc2"), false => false ; "remote server node is guarded")]
#[test_case("server_node", Some("DC2"), false => false ; "type and location compare case-insensitively")]
#[test_case("SERVER_NODE", Some("DC1"), false => true ; "local server node")]
#[test_case("SERVER_NODE", None, false => true ; "server node without location")]
#[test_case("CONFIGURATION", Some("dc2"), false => true ; "non server assets are never guarded")]
#[test_case("SERVER_NODE", Some("dc2"), true => true ; "inter dc mode disables the guard")]
fn locality_guard_matrix(asset_type: &str, location: Option<&str>, inter_dc: bool) -> bool {
    tokio_test::block_on(async {
        let mut asset = Asset::new("000001", asset_type, "ALLOCATED");
        if let Some(location) = location {
            asset = asset.with_location(location);
        }
        let inventory = InMemoryInventory::new();
        inventory.insert(asset);

        let (ctx, _) = context_with(inventory, Some(LOCAL_DC));
        if inter_dc {
            ctx.enable_inter_dc_mode();
        }

        ctx.set(
            &AssetTag::new("000001"),
            AttributeUpdate::new().with("secondary_role", "standby_slave"),
        )
        .await
        .unwrap();

        !ctx.client().writes().is_empty()
    })
}

#[tokio::test]
async fn test_pool_lookup_resolves_configuration_asset() {
    let (ctx, sink) = context();
    let pool = ctx.lookup("users", AssetQuery::pool("users"));

    pretty_assertions::assert_eq!(ctx.get(&pool, "primary_role").await.unwrap(), "MYSQL_POOL");

    // configuration assets are not server nodes, so dc2 does not matter
    ctx.set(&pool, AttributeUpdate::new().with("slave_weight", "100"))
        .await
        .unwrap();
    pretty_assertions::assert_eq!(
        sink.notices(),
        vec!["users: Collins attribute SLAVE_WEIGHT set to 100".to_string()]
    );
}
