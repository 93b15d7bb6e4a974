// Copyright (c) 2025 - Cowboy AI, Inc.

//! In-memory inventory
//!
//! A self-contained [`InventoryClient`] that keeps assets in a map, knows
//! which (status, state) pairings exist and records every accepted and
//! rejected write. Used as the test double for the attribute engine and for
//! dry runs.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::{Asset, AssetState, StateDefinition};
use crate::errors::AssetSyncResult;
use crate::inventory::{AssetQuery, InventoryClient};

/// A write sent to the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryWrite {
    Status {
        tag: String,
        status: String,
        reason: Option<String>,
        state: Option<String>,
    },
    Attribute {
        tag: String,
        name: String,
        value: String,
    },
    StateCreated(StateDefinition),
}

#[derive(Debug, Default)]
struct Inner {
    assets: HashMap<String, Asset>,
    pairings: HashSet<(String, String)>,
    accepted: Vec<InventoryWrite>,
    rejected: Vec<InventoryWrite>,
    queries: Vec<AssetQuery>,
    reject_status: bool,
    reject_attributes: bool,
    reject_state_creation: bool,
}

/// In-memory inventory service
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    inner: Mutex<Inner>,
}

fn pairing_key(status: &str, state: &str) -> (String, String) {
    (status.to_ascii_uppercase(), state.to_ascii_uppercase())
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store (or replace) an asset. Its current pairing becomes known.
    pub fn insert(&self, asset: Asset) {
        let mut inner = self.lock();
        if let Some(state) = &asset.state {
            inner.pairings.insert(pairing_key(&asset.status, &state.name));
        }
        inner.assets.insert(asset.tag.clone(), asset);
    }

    /// Mark a (status, state) pairing as known
    pub fn register_pairing(&self, status: &str, state: &str) {
        self.lock().pairings.insert(pairing_key(status, state));
    }

    pub fn knows_pairing(&self, status: &str, state: &str) -> bool {
        self.lock().pairings.contains(&pairing_key(status, state))
    }

    /// Current copy of an asset
    pub fn asset(&self, tag: &str) -> Option<Asset> {
        self.lock().assets.get(tag).cloned()
    }

    /// Writes the service accepted, in order
    pub fn writes(&self) -> Vec<InventoryWrite> {
        self.lock().accepted.clone()
    }

    /// Writes the service refused, in order
    pub fn rejected(&self) -> Vec<InventoryWrite> {
        self.lock().rejected.clone()
    }

    /// Queries received by `find_assets`, in order
    pub fn queries(&self) -> Vec<AssetQuery> {
        self.lock().queries.clone()
    }

    pub fn reject_status_writes(&self, reject: bool) {
        self.lock().reject_status = reject;
    }

    pub fn reject_attribute_writes(&self, reject: bool) {
        self.lock().reject_attributes = reject;
    }

    pub fn reject_state_creation(&self, reject: bool) {
        self.lock().reject_state_creation = reject;
    }
}

#[async_trait]
impl InventoryClient for InMemoryInventory {
    async fn get_asset(&self, tag: &str) -> AssetSyncResult<Option<Asset>> {
        Ok(self.asset(tag))
    }

    async fn find_assets(&self, query: &AssetQuery) -> AssetSyncResult<Vec<Asset>> {
        let mut inner = self.lock();
        inner.queries.push(query.clone());

        let mut found: Vec<Asset> = inner
            .assets
            .values()
            .filter(|asset| {
                query.params.iter().all(|(field, value)| {
                    asset
                        .field(field)
                        .map(|v| v.eq_ignore_ascii_case(value))
                        .unwrap_or(false)
                })
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.tag.cmp(&b.tag));
        Ok(found)
    }

    async fn set_status(
        &self,
        asset: &Asset,
        status: &str,
        reason: Option<&str>,
        state: Option<&str>,
    ) -> AssetSyncResult<bool> {
        let mut inner = self.lock();
        let write = InventoryWrite::Status {
            tag: asset.tag.clone(),
            status: status.to_string(),
            reason: reason.map(str::to_string),
            state: state.map(str::to_string),
        };

        let pairing_known = state
            .map(|s| inner.pairings.contains(&pairing_key(status, s)))
            .unwrap_or(true);
        let exists = inner.assets.contains_key(&asset.tag);

        if inner.reject_status || !pairing_known || !exists {
            debug!("Rejecting status write for {}: {:?}", asset.tag, write);
            inner.rejected.push(write);
            return Ok(false);
        }

        if let Some(stored) = inner.assets.get_mut(&asset.tag) {
            stored.status = status.to_string();
            if let Some(state) = state {
                stored.state = Some(AssetState::named(state));
            }
        }
        inner.accepted.push(write);
        Ok(true)
    }

    async fn set_attribute(
        &self,
        asset: &Asset,
        name: &str,
        value: &str,
    ) -> AssetSyncResult<bool> {
        let mut inner = self.lock();
        let write = InventoryWrite::Attribute {
            tag: asset.tag.clone(),
            name: name.to_string(),
            value: value.to_string(),
        };

        let reject = inner.reject_attributes;
        match inner.assets.get_mut(&asset.tag) {
            Some(stored) if !reject => {
                stored.store_attribute(name, value);
                inner.accepted.push(write);
                Ok(true)
            }
            _ => {
                inner.rejected.push(write);
                Ok(false)
            }
        }
    }

    async fn create_state(&self, definition: &StateDefinition) -> AssetSyncResult<bool> {
        let mut inner = self.lock();
        let write = InventoryWrite::StateCreated(definition.clone());

        if inner.reject_state_creation {
            inner.rejected.push(write);
            return Ok(false);
        }

        inner
            .pairings
            .insert(pairing_key(&definition.status, &definition.name));
        inner.accepted.push(write);
        Ok(true)
    }

    async fn health_check(&self) -> AssetSyncResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "in-memory-inventory"
    }
}
