// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! - [`Asset`] - handle to one inventory record
//! - [`Lifecycle`] - the (status, state) pair every transition works on
//! - [`LocalityPolicy`] - datacenter guard consulted before mutations

pub mod asset;
pub mod lifecycle;
pub mod locality;

pub use asset::{Asset, AssetState, StateDefinition, SERVER_NODE};
pub use lifecycle::{Lifecycle, LifecycleChange, ValueChange};
pub use locality::{LocalityPolicy, UNKNOWN_DATACENTER};
