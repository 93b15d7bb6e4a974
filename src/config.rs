// Copyright (c) 2025 - Cowboy AI, Inc.

//! Collins connection and locality configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{AssetSyncError, AssetSyncResult};

/// Configuration for the Collins inventory connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollinsConfig {
    /// Collins base URL (e.g., "http://collins.example.com:9000")
    #[serde(default)]
    pub url: String,

    /// Username for basic authentication
    #[serde(default)]
    pub user: String,

    /// Password for basic authentication
    #[serde(default)]
    pub password: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Datacenter this process operates in
    #[serde(default)]
    pub datacenter: Option<String>,

    /// Ask Collins to include assets held by remote datacenters in searches
    #[serde(default)]
    pub remote_lookup: bool,

    /// Disable the locality guard for this process
    #[serde(default)]
    pub inter_dc_mode: bool,
}

fn default_timeout() -> u64 {
    30
}

impl Default for CollinsConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: String::new(),
            password: String::new(),
            timeout_secs: default_timeout(),
            datacenter: None,
            remote_lookup: false,
            inter_dc_mode: false,
        }
    }
}

impl CollinsConfig {
    /// Create a configuration with the required connection settings
    pub fn new(
        url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            user: user.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Set the datacenter
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Load configuration from `COLLINS_*` environment variables
    pub fn from_env() -> AssetSyncResult<Self> {
        let flag = |name: &str| {
            std::env::var(name)
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false)
        };

        let timeout_secs = match std::env::var("COLLINS_TIMEOUT") {
            Ok(raw) => raw.parse().map_err(|_| {
                AssetSyncError::Configuration(format!("COLLINS_TIMEOUT is not a number: {}", raw))
            })?,
            Err(_) => default_timeout(),
        };

        let config = Self {
            url: std::env::var("COLLINS_URL").unwrap_or_default(),
            user: std::env::var("COLLINS_USER").unwrap_or_default(),
            password: std::env::var("COLLINS_PASSWORD").unwrap_or_default(),
            timeout_secs,
            datacenter: std::env::var("COLLINS_DATACENTER").ok(),
            remote_lookup: flag("COLLINS_REMOTE_LOOKUP"),
            inter_dc_mode: flag("COLLINS_INTER_DC_MODE"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an embedded JSON block
    pub fn from_json(value: serde_json::Value) -> AssetSyncResult<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every required connection setting is present
    pub fn validate(&self) -> AssetSyncResult<()> {
        for (key, value) in [
            ("url", &self.url),
            ("user", &self.user),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(AssetSyncError::Configuration(format!(
                    "missing required Collins setting '{}'",
                    key
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(AssetSyncError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
