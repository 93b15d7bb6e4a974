// Copyright (c) 2025 - Cowboy AI, Inc.
//! Asset Handle
//!
//! One inventory record as seen by the attribute engine. Free-form attributes
//! are keyed case-insensitively and stored upper-case, matching how Collins
//! keeps them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::lifecycle::Lifecycle;

/// Asset type subject to the locality guard
pub const SERVER_NODE: &str = "SERVER_NODE";

/// Fine-grained lifecycle sub-state, always read together with a status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetState {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AssetState {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            description: None,
        }
    }
}

/// A state definition to register with the inventory service
///
/// A (status, state) pairing must be known to Collins before an asset can be
/// moved into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefinition {
    pub name: String,
    pub label: String,
    pub description: String,
    pub status: String,
}

impl StateDefinition {
    /// Definition using the state name as machine name, label and description
    pub fn for_pairing(state: &str, status: &str) -> Self {
        Self {
            name: state.to_string(),
            label: state.to_string(),
            description: state.to_string(),
            status: status.to_string(),
        }
    }
}

/// Handle to one inventory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub tag: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<AssetState>,
    #[serde(default)]
    attributes: HashMap<String, String>,
}

impl Asset {
    pub fn new(
        tag: impl Into<String>,
        asset_type: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            asset_type: asset_type.into(),
            location: None,
            status: status.into(),
            state: None,
            attributes: HashMap::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_state(mut self, name: impl Into<String>) -> Self {
        self.state = Some(AssetState::named(name));
        self
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.store_attribute(name, value);
        self
    }

    /// Free-form attribute value, looked up case-insensitively
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// All free-form attributes, keyed upper-case
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Store an attribute value; an empty value deletes the attribute
    pub fn store_attribute(&mut self, name: &str, value: impl Into<String>) {
        let key = name.to_ascii_uppercase();
        let value = value.into();
        if value.is_empty() {
            self.attributes.remove(&key);
        } else {
            self.attributes.insert(key, value);
        }
    }

    /// Current state name, empty when the record carries no state
    pub fn state_name(&self) -> &str {
        self.state.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Current (status, state) pair
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::new(self.status.clone(), self.state_name())
    }

    pub fn is_server_node(&self) -> bool {
        self.asset_type.eq_ignore_ascii_case(SERVER_NODE)
    }

    /// Raw value of a named field, as stored
    ///
    /// The record's own columns (`tag`, `type`, `location`, `status`,
    /// `state`) take precedence over free-form attributes of the same name.
    pub fn field(&self, name: &str) -> Option<String> {
        match name.to_ascii_lowercase().as_str() {
            "tag" => Some(self.tag.clone()),
            "type" => Some(self.asset_type.clone()),
            "location" => self.location.clone(),
            "status" => Some(self.status.clone()),
            "state" => self.state.as_ref().map(|s| s.name.clone()),
            _ => self.attribute(name).map(str::to_string),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_are_case_insensitive() {
        let asset = Asset::new("001234", SERVER_NODE, "Allocated").with_attribute("pool", "users");

        assert_eq!(asset.attribute("POOL"), Some("users"));
        assert_eq!(asset.attribute("Pool"), Some("users"));
        assert!(asset.attributes().contains_key("POOL"));
    }

    #[test]
    fn test_empty_value_removes_attribute() {
        let mut asset = Asset::new("001234", SERVER_NODE, "Allocated").with_attribute("pool", "x");
        asset.store_attribute("pool", "");
        assert_eq!(asset.attribute("pool"), None);
    }

    #[test]
    fn test_field_prefers_record_columns() {
        let asset = Asset::new("001234", "server_node", "Allocated")
            .with_location("dc2")
            .with_state("RUNNING");

        assert_eq!(asset.field("status").as_deref(), Some("Allocated"));
        assert_eq!(asset.field("state").as_deref(), Some("RUNNING"));
        assert_eq!(asset.field("location").as_deref(), Some("dc2"));
        assert_eq!(asset.field("secondary_role"), None);
        assert!(asset.is_server_node());
    }

    #[test]
    fn test_state_name_defaults_to_empty() {
        let asset = Asset::new("001234", SERVER_NODE, "Allocated");
        assert_eq!(asset.state_name(), "");
    }
}
