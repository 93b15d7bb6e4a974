// Copyright (c) 2025 - Cowboy AI, Inc.
//! Attribute Service
//!
//! [`CollinsContext`] is built once at startup and passed to whoever needs to
//! read or write inventory facts. It owns:
//!
//! - the inventory client (HTTP or in-memory)
//! - the [`LocalityPolicy`]
//! - the [`AccessorRegistry`]
//! - the [`NoticeSink`] receiving change and warning notices
//!
//! # Flow
//!
//! ```text
//! Domain object
//!     ↓ collins_asset()
//! Asset handle
//!     ↓ locality guard (writes only)
//! Engine get / set
//!     ↓
//! InventoryClient
//! ```
//!
//! Every call is a sequence of awaited round trips; nothing is cached between
//! calls and nothing runs in the background.

pub mod attributes;
pub mod notice;

pub use attributes::{AttributeUpdate, FieldRequest, FieldValues, GetResult, AUDIT_COMMENT};
pub use notice::{NoticeSink, RecordingSink, TracingSink, WARNING_PREFIX};

use std::sync::Arc;
use tracing::debug;

use crate::accessors::{Accessor, AccessorRegistry};
use crate::capability::{AssetLookup, CollinsAsset};
use crate::domain::{Asset, LocalityPolicy, StateDefinition};
use crate::errors::{AssetSyncError, AssetSyncResult};
use crate::inventory::{AssetQuery, InventoryClient};

#[cfg(feature = "collins")]
use crate::{adapters::CollinsClient, config::CollinsConfig};

/// Shared handle to the inventory, locality policy and accessor table
pub struct CollinsContext<C: InventoryClient> {
    client: C,
    locality: LocalityPolicy,
    accessors: AccessorRegistry,
    sink: Arc<dyn NoticeSink>,
}

#[cfg(feature = "collins")]
impl CollinsContext<CollinsClient> {
    /// Build the HTTP client and locality policy from configuration
    pub fn connect(config: &CollinsConfig) -> AssetSyncResult<Self> {
        let client = CollinsClient::new(config)?;
        Ok(Self::new(client, LocalityPolicy::from_config(config)))
    }
}

impl<C: InventoryClient> CollinsContext<C> {
    pub fn new(client: C, locality: LocalityPolicy) -> Self {
        Self {
            client,
            locality,
            accessors: AccessorRegistry::with_baseline(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Route notices somewhere other than `tracing`
    pub fn with_sink(mut self, sink: Arc<dyn NoticeSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn locality(&self) -> &LocalityPolicy {
        &self.locality
    }

    pub fn current_datacenter(&self) -> String {
        self.locality.current_datacenter()
    }

    pub fn enable_inter_dc_mode(&self) {
        self.locality.enable_inter_dc_mode()
    }

    pub fn inter_dc_mode(&self) -> bool {
        self.locality.inter_dc_mode()
    }

    pub fn accessors(&self) -> &AccessorRegistry {
        &self.accessors
    }

    /// Register an extra named accessor
    pub fn declare_attribute(&mut self, name: &str) -> Accessor {
        self.accessors.declare(name).clone()
    }

    fn accessor(&self, name: &str) -> AssetSyncResult<&Accessor> {
        self.accessors
            .accessor(name)
            .ok_or_else(|| AssetSyncError::UnknownAccessor(name.to_string()))
    }

    /// Read through a declared accessor
    pub async fn read_attribute<S>(&self, subject: &S, name: &str) -> AssetSyncResult<String>
    where
        S: CollinsAsset + ?Sized,
    {
        self.accessor(name)?.get(self, subject).await
    }

    /// Write through a declared accessor
    pub async fn write_attribute<S>(
        &self,
        subject: &S,
        name: &str,
        value: &str,
    ) -> AssetSyncResult<()>
    where
        S: CollinsAsset + ?Sized,
    {
        self.accessor(name)?.set(self, subject, value).await
    }

    pub(crate) fn emit(&self, subject: &str, message: &str) {
        self.sink.emit(&format!("{}: {}", subject, message));
    }

    // Operations forwarded to the inventory client

    pub async fn find_asset(&self, tag: &str) -> AssetSyncResult<Option<Asset>> {
        self.client.get_asset(tag).await
    }

    /// Search assets; remote datacenters are included when the policy allows
    pub async fn find_assets(&self, query: AssetQuery) -> AssetSyncResult<Vec<Asset>> {
        let query = AssetQuery {
            remote_lookup: query.remote_lookup || self.locality.remote_lookup(),
            ..query
        };
        self.client.find_assets(&query).await
    }

    pub async fn create_state(&self, definition: &StateDefinition) -> AssetSyncResult<bool> {
        self.client.create_state(definition).await
    }

    pub async fn ping(&self) -> AssetSyncResult<()> {
        debug!("Checking {} connectivity", self.client.name());
        self.client.health_check().await
    }

    /// Participant resolved by query, honouring the remote lookup setting
    pub fn lookup(&self, name: &str, query: AssetQuery) -> AssetLookup {
        let remote = query.remote_lookup || self.locality.remote_lookup();
        AssetLookup::new(name, query).with_remote_lookup(remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryInventory;
    use crate::capability::AssetTag;
    use crate::domain::SERVER_NODE;

    fn context() -> CollinsContext<InMemoryInventory> {
        let inventory = InMemoryInventory::new();
        inventory.insert(
            Asset::new("001234", SERVER_NODE, "Allocated")
                .with_attribute("hostname", "db1")
                .with_attribute("slave_weight", "100"),
        );
        CollinsContext::new(inventory, LocalityPolicy::new(Some("dc1".to_string())))
    }

    #[tokio::test]
    async fn test_undeclared_accessor_is_unknown() {
        let ctx = context();
        let result = ctx.read_attribute(&AssetTag::new("001234"), "slave_weight").await;
        assert!(matches!(result, Err(AssetSyncError::UnknownAccessor(_))));
    }

    #[tokio::test]
    async fn test_declared_accessor_reads_lower_case() {
        let mut ctx = context();
        ctx.declare_attribute("slave_weight");
        let value = ctx
            .read_attribute(&AssetTag::new("001234"), "slave_weight")
            .await
            .unwrap();
        assert_eq!(value, "100");
    }

    #[tokio::test]
    async fn test_ping_reaches_named_client() {
        let ctx = context();
        assert_eq!(ctx.client().name(), "in-memory-inventory");
        ctx.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_find_assets_adds_remote_lookup_in_inter_dc_mode() {
        let ctx = context();
        ctx.find_assets(AssetQuery::new().with("hostname", "db1"))
            .await
            .unwrap();
        ctx.enable_inter_dc_mode();
        let found = ctx
            .find_assets(AssetQuery::new().with("hostname", "db1"))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        let flags: Vec<bool> = ctx.client().queries().iter().map(|q| q.remote_lookup).collect();
        assert_eq!(flags, vec![false, true]);
        assert!(ctx.lookup("db1", AssetQuery::new()).query().remote_lookup);
    }
}
