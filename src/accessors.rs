// Copyright (c) 2025 - Cowboy AI, Inc.
//! Attribute Accessors
//!
//! A registration table mapping attribute name to a getter/setter pair. The
//! getter returns the lower-cased value (empty when absent); the setter
//! delegates to the engine's `set`. Every context starts with the baseline
//! vocabulary in [`BASELINE_ATTRIBUTES`]; domain objects may declare more.
//!
//! ```rust,no_run
//! use cim_asset_sync::accessors::AccessorRegistry;
//!
//! let mut registry = AccessorRegistry::with_baseline();
//! registry.declare("slave_weight");
//! assert!(registry.accessor("SLAVE_WEIGHT").is_some());
//! ```

use std::collections::BTreeMap;

use crate::capability::CollinsAsset;
use crate::errors::AssetSyncResult;
use crate::inventory::InventoryClient;
use crate::service::{AttributeUpdate, CollinsContext};

/// Attributes every participating type can rely on
pub const BASELINE_ATTRIBUTES: [&str; 5] =
    ["primary_role", "secondary_role", "pool", "status", "state"];

/// Getter/setter pair for one attribute name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    field: String,
}

impl Accessor {
    fn new(field: &str) -> Self {
        Self {
            field: field.to_ascii_lowercase(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Current value, lower-cased; empty when absent
    pub async fn get<C, S>(&self, ctx: &CollinsContext<C>, subject: &S) -> AssetSyncResult<String>
    where
        C: InventoryClient,
        S: CollinsAsset + ?Sized,
    {
        Ok(ctx.get(subject, &self.field).await?.to_lowercase())
    }

    /// Write through the engine's `set`
    pub async fn set<C, S>(
        &self,
        ctx: &CollinsContext<C>,
        subject: &S,
        value: &str,
    ) -> AssetSyncResult<()>
    where
        C: InventoryClient,
        S: CollinsAsset + ?Sized,
    {
        ctx.set(subject, AttributeUpdate::new().with(&self.field, value))
            .await
    }
}

/// Accessor table keyed by lower-case attribute name
#[derive(Debug, Clone, Default)]
pub struct AccessorRegistry {
    accessors: BTreeMap<String, Accessor>,
}

impl AccessorRegistry {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the baseline vocabulary
    pub fn with_baseline() -> Self {
        let mut registry = Self::new();
        for name in BASELINE_ATTRIBUTES {
            registry.declare(name);
        }
        registry
    }

    /// Register an accessor for `name`. Declaring twice is harmless.
    pub fn declare(&mut self, name: &str) -> &Accessor {
        let accessor = Accessor::new(name);
        self.accessors
            .entry(accessor.field.clone())
            .or_insert(accessor)
    }

    pub fn accessor(&self, name: &str) -> Option<&Accessor> {
        self.accessors.get(&name.to_ascii_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accessors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}
