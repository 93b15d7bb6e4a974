// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-asset-sync
//!
//! Deterministic inventory contents and a small domain object that resolves
//! through the capability contract. Every test builds its context here so
//! the datacenter, notice sink and seeded assets are the same everywhere.

#![allow(dead_code)]

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use cim_asset_sync::adapters::InMemoryInventory;
use cim_asset_sync::domain::{Asset, LocalityPolicy, SERVER_NODE};
use cim_asset_sync::{AssetSyncResult, CollinsAsset, CollinsContext, InventoryClient, RecordingSink};

pub const LOCAL_TAG: &str = "001234";
pub const REMOTE_TAG: &str = "005678";
pub const POOL_TAG: &str = "cfg-users";

pub const LOCAL_DC: &str = "dc1";
pub const REMOTE_DC: &str = "dc2";

/// A database server as the fleet tooling models it
#[derive(Debug, Clone)]
pub struct Server {
    pub hostname: String,
    pub tag: Option<String>,
}

impl Server {
    pub fn provisioned(hostname: &str, tag: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            tag: Some(tag.to_string()),
        }
    }

    /// A server that has no inventory record yet
    pub fn unprovisioned(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            tag: None,
        }
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hostname)
    }
}

#[async_trait]
impl CollinsAsset for Server {
    async fn collins_asset(
        &self,
        inventory: &dyn InventoryClient,
    ) -> AssetSyncResult<Option<Asset>> {
        match &self.tag {
            Some(tag) => inventory.get_asset(tag).await,
            None => Ok(None),
        }
    }
}

/// Server node in this process's datacenter
pub fn local_server_asset() -> Asset {
    Asset::new(LOCAL_TAG, SERVER_NODE, "ALLOCATED")
        .with_location(LOCAL_DC)
        .with_state("RUNNING")
        .with_attribute("pool", "USERS")
        .with_attribute("secondary_role", "STANDBY_SLAVE")
}

/// Server node recorded in the other datacenter
pub fn remote_server_asset() -> Asset {
    Asset::new(REMOTE_TAG, "server_node", "ALLOCATED")
        .with_location(REMOTE_DC)
        .with_state("RUNNING")
}

/// Pool configuration asset (not a server node, never location-guarded)
pub fn pool_asset() -> Asset {
    Asset::new(POOL_TAG, "CONFIGURATION", "Allocated")
        .with_location(REMOTE_DC)
        .with_attribute("primary_role", "MYSQL_POOL")
        .with_attribute("pool", "USERS")
}

pub fn local_server() -> Server {
    Server::provisioned("db1.dc1", LOCAL_TAG)
}

pub fn remote_server() -> Server {
    Server::provisioned("db9.dc2", REMOTE_TAG)
}

pub fn seeded_inventory() -> InMemoryInventory {
    let inventory = InMemoryInventory::new();
    inventory.insert(local_server_asset());
    inventory.insert(remote_server_asset());
    inventory.insert(pool_asset());
    inventory.register_pairing("MAINTENANCE", "RUNNING");
    inventory
}

/// Context running in `dc1` with a recording sink
pub fn context() -> (CollinsContext<InMemoryInventory>, Arc<RecordingSink>) {
    context_with(seeded_inventory(), Some(LOCAL_DC))
}

pub fn context_with(
    inventory: InMemoryInventory,
    datacenter: Option<&str>,
) -> (CollinsContext<InMemoryInventory>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let ctx = CollinsContext::new(
        inventory,
        LocalityPolicy::new(datacenter.map(str::to_string)),
    )
    .with_sink(sink.clone());
    (ctx, sink)
}
