// Copyright (c) 2025 - Cowboy AI, Inc.
//! Attribute synchronization between fleet objects and the Collins inventory
//!
//! Domain objects (servers, pools, shards, topology nodes) implement
//! [`CollinsAsset`] to resolve themselves to an inventory record. The
//! [`CollinsContext`] then reads and writes named facts on that record,
//! enforcing the status/state pairing policy and the datacenter locality
//! guard before anything is mutated.

pub mod accessors;
pub mod adapters;
pub mod capability;
pub mod config;
pub mod domain;
pub mod errors;
pub mod inventory;
pub mod service;

// Re-export commonly used types
pub use accessors::{Accessor, AccessorRegistry, BASELINE_ATTRIBUTES};
pub use capability::{AssetLookup, AssetTag, CollinsAsset};
pub use config::CollinsConfig;
pub use domain::{Asset, LocalityPolicy, StateDefinition};
pub use errors::{AssetSyncError, AssetSyncResult};
pub use inventory::{AssetQuery, InventoryClient};
pub use service::{
    AttributeUpdate, CollinsContext, FieldRequest, FieldValues, GetResult, NoticeSink,
    RecordingSink, TracingSink,
};
