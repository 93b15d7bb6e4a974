// Copyright (c) 2025 - Cowboy AI, Inc.
//! Locality & Mode Policy
//!
//! Decides whether an asset may be mutated from this process. Server nodes
//! recorded in another datacenter are off limits unless inter-DC mode has
//! been switched on. Reads are never gated.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

use super::asset::Asset;
use crate::config::CollinsConfig;

/// Datacenter reported when none is configured
pub const UNKNOWN_DATACENTER: &str = "UNKNOWN-DC";

/// Process-wide locality settings
///
/// Inter-DC mode is one-directional: once enabled it stays enabled for the
/// life of the policy.
#[derive(Debug, Default)]
pub struct LocalityPolicy {
    datacenter: Option<String>,
    inter_dc_mode: AtomicBool,
    remote_lookup: AtomicBool,
}

impl LocalityPolicy {
    pub fn new(datacenter: Option<String>) -> Self {
        Self {
            datacenter,
            inter_dc_mode: AtomicBool::new(false),
            remote_lookup: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &CollinsConfig) -> Self {
        let policy = Self::new(config.datacenter.clone());
        policy
            .remote_lookup
            .store(config.remote_lookup, Ordering::SeqCst);
        if config.inter_dc_mode {
            policy.enable_inter_dc_mode();
        }
        policy
    }

    /// Configured datacenter upper-cased, or `UNKNOWN-DC`
    pub fn current_datacenter(&self) -> String {
        match &self.datacenter {
            Some(dc) if !dc.is_empty() => dc.to_ascii_uppercase(),
            _ => UNKNOWN_DATACENTER.to_string(),
        }
    }

    /// Disable the locality guard; also turns on remote lookups
    pub fn enable_inter_dc_mode(&self) {
        if !self.inter_dc_mode.swap(true, Ordering::SeqCst) {
            info!("Inter-DC mode enabled, locality guard disabled");
        }
        self.remote_lookup.store(true, Ordering::SeqCst);
    }

    pub fn inter_dc_mode(&self) -> bool {
        self.inter_dc_mode.load(Ordering::SeqCst)
    }

    pub fn remote_lookup(&self) -> bool {
        self.remote_lookup.load(Ordering::SeqCst)
    }

    /// Whether `asset` may be mutated from this datacenter
    pub fn permits_mutation(&self, asset: &Asset) -> bool {
        if self.inter_dc_mode() || !asset.is_server_node() {
            return true;
        }

        match asset.location.as_deref() {
            Some(location) if !location.is_empty() => {
                location.eq_ignore_ascii_case(&self.current_datacenter())
            }
            _ => true,
        }
    }
}
