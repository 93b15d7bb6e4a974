// Copyright (c) 2025 - Cowboy AI, Inc.

//! Inventory client implementations
//!
//! Concrete implementations of the [`InventoryClient`](crate::inventory::InventoryClient)
//! trait: the Collins HTTP client and an in-memory inventory.

#[cfg(feature = "collins")]
pub mod collins;

#[cfg(feature = "collins")]
pub use collins::CollinsClient;

pub mod memory;

pub use memory::{InMemoryInventory, InventoryWrite};
