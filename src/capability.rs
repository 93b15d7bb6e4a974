// Copyright (c) 2025 - Cowboy AI, Inc.
//! Capability Contract
//!
//! A domain object (server, pool, shard, topology node) participates in
//! attribute synchronization by implementing [`CollinsAsset`]: one operation
//! that resolves the object to its inventory record, or to nothing when the
//! object has not been provisioned yet. The engine never assumes direct
//! access to a handle.
//!
//! Two stock participants are provided:
//!
//! - [`AssetTag`] - identified by inventory tag
//! - [`AssetLookup`] - identified by a search (hostname, pool selector, ...)

use async_trait::async_trait;
use std::fmt;

use crate::domain::Asset;
use crate::errors::{AssetSyncError, AssetSyncResult};
use crate::inventory::{AssetQuery, InventoryClient};

/// Resolve-to-asset contract
///
/// The default implementation reports a capability fault naming the type:
/// a participant that forgets to override it is a programming error.
#[async_trait]
pub trait CollinsAsset: fmt::Display + Send + Sync {
    async fn collins_asset(
        &self,
        _inventory: &dyn InventoryClient,
    ) -> AssetSyncResult<Option<Asset>> {
        Err(AssetSyncError::Capability(
            std::any::type_name::<Self>().to_string(),
        ))
    }
}

/// Object known by its inventory tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetTag(String);

impl AssetTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
impl CollinsAsset for AssetTag {
    async fn collins_asset(
        &self,
        inventory: &dyn InventoryClient,
    ) -> AssetSyncResult<Option<Asset>> {
        inventory.get_asset(&self.0).await
    }
}

/// Object known by a search that must match at most one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLookup {
    name: String,
    query: AssetQuery,
}

impl AssetLookup {
    pub fn new(name: impl Into<String>, query: AssetQuery) -> Self {
        Self {
            name: name.into(),
            query,
        }
    }

    /// Server found by hostname
    pub fn hostname(hostname: &str) -> Self {
        Self::new(hostname, AssetQuery::new().with("hostname", hostname))
    }

    /// Pool configuration asset
    pub fn pool(name: &str) -> Self {
        Self::new(name, AssetQuery::pool(name))
    }

    pub fn query(&self) -> &AssetQuery {
        &self.query
    }

    pub fn with_remote_lookup(mut self, remote_lookup: bool) -> Self {
        self.query.remote_lookup = remote_lookup;
        self
    }
}

impl fmt::Display for AssetLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[async_trait]
impl CollinsAsset for AssetLookup {
    async fn collins_asset(
        &self,
        inventory: &dyn InventoryClient,
    ) -> AssetSyncResult<Option<Asset>> {
        let mut found = inventory.find_assets(&self.query).await?;
        match found.len() {
            0 | 1 => Ok(found.pop()),
            count => Err(AssetSyncError::AmbiguousAsset {
                query: self.query.to_string(),
                count,
            }),
        }
    }
}
