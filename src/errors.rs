// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for asset synchronization operations

use thiserror::Error;

/// Errors that can occur while reading or writing inventory attributes
#[derive(Debug, Error)]
pub enum AssetSyncError {
    /// Required connection setting missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A participating type does not resolve itself to an asset
    #[error("{0} does not implement collins_asset")]
    Capability(String),

    /// Inventory rejected a plain status transition
    #[error("Unable to set Collins status to {status}")]
    StatusTransition { status: String },

    /// Inventory rejected a combined status/state transition, even after
    /// registering the state definition
    #[error("Unable to set Collins state to {state} and Unable to set Collins status to {status}")]
    StateTransition { state: String, status: String },

    /// A state was requested without a status in the same update
    #[error("Unable to set Collins state to {state} without also setting a status")]
    StateWithoutStatus { state: String },

    /// Inventory rejected an attribute write
    #[error("Unable to set Collins attribute {field} to {value}")]
    AttributeWrite { field: String, value: String },

    /// No accessor declared under this name
    #[error("Unknown attribute accessor: {0}")]
    UnknownAccessor(String),

    /// A lookup that must identify one asset matched several
    #[error("Lookup {query} matched {count} assets, expected at most one")]
    AmbiguousAsset { query: String, count: usize },

    /// Transport level failure talking to the inventory service
    #[error("Collins transport error: {0}")]
    Transport(String),

    /// The inventory service answered with something we cannot use
    #[error("Unexpected Collins response: {0}")]
    UnexpectedResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for asset synchronization operations
pub type AssetSyncResult<T> = Result<T, AssetSyncError>;

impl From<serde_json::Error> for AssetSyncError {
    fn from(err: serde_json::Error) -> Self {
        AssetSyncError::Serialization(err.to_string())
    }
}

#[cfg(feature = "collins")]
impl From<reqwest::Error> for AssetSyncError {
    fn from(err: reqwest::Error) -> Self {
        AssetSyncError::Transport(err.to_string())
    }
}
