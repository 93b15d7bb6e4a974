// Copyright (c) 2025 - Cowboy AI, Inc.

//! Inventory Client Facade
//!
//! Every inventory operation this layer uses or forwards is listed on
//! [`InventoryClient`]. The attribute engine only ever talks to the service
//! through this trait, so any implementation (the Collins HTTP client, the
//! in-memory double) can sit behind it.
//!
//! # Write results
//!
//! Mutating calls distinguish two failure shapes:
//!
//! - `Ok(false)`: the service answered and refused the write (unknown
//!   status/state pairing, invalid attribute, ...). The engine decides what
//!   happens next.
//! - `Err(_)`: the service could not be reached or answered garbage. This
//!   always propagates.
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_asset_sync::adapters::InMemoryInventory;
//! use cim_asset_sync::domain::{Asset, SERVER_NODE};
//! use cim_asset_sync::inventory::InventoryClient;
//!
//! # async fn demo() -> cim_asset_sync::AssetSyncResult<()> {
//! let inventory = InMemoryInventory::new();
//! inventory.insert(Asset::new("001234", SERVER_NODE, "Allocated"));
//!
//! let asset = inventory.get_asset("001234").await?.expect("asset");
//! inventory.set_attribute(&asset, "POOL", "USERS").await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Asset, StateDefinition};
use crate::errors::AssetSyncResult;

/// Search parameters for an asset query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetQuery {
    /// Field/value pairs that must all match
    pub params: Vec<(String, String)>,

    /// Include assets held by remote datacenters
    #[serde(default)]
    pub remote_lookup: bool,
}

impl AssetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field constraint
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((field.into(), value.into()));
        self
    }

    /// Selector for a pool's configuration asset
    pub fn pool(name: &str) -> Self {
        Self::new()
            .with("type", "CONFIGURATION")
            .with("primary_role", "MYSQL_POOL")
            .with("pool", name.to_ascii_uppercase())
            .with("status", "Allocated")
    }
}

impl fmt::Display for AssetQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Operations supported against the remote inventory service
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Fetch one asset by tag; `None` when the tag is unknown
    async fn get_asset(&self, tag: &str) -> AssetSyncResult<Option<Asset>>;

    /// Search assets matching every constraint in `query`
    async fn find_assets(&self, query: &AssetQuery) -> AssetSyncResult<Vec<Asset>>;

    /// Move an asset to `status`, optionally together with `state`
    async fn set_status(
        &self,
        asset: &Asset,
        status: &str,
        reason: Option<&str>,
        state: Option<&str>,
    ) -> AssetSyncResult<bool>;

    /// Write a free-form attribute; an empty value removes it
    async fn set_attribute(&self, asset: &Asset, name: &str, value: &str)
        -> AssetSyncResult<bool>;

    /// Register a new state definition
    async fn create_state(&self, definition: &StateDefinition) -> AssetSyncResult<bool>;

    /// Verify connectivity to the service
    async fn health_check(&self) -> AssetSyncResult<()>;

    /// Name of this client, for logs
    fn name(&self) -> &str;
}
