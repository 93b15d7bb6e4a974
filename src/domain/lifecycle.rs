// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lifecycle Pair
//!
//! An asset's lifecycle is the pair (status, state). State alone means
//! nothing; every comparison and every transition covers both members.

use serde::{Deserialize, Serialize};

/// (status, state) pair of an asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lifecycle {
    pub status: String,
    pub state: String,
}

/// A single member's move from one value to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    pub from: String,
    pub to: String,
}

/// Which members of the pair differ between current and desired
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleChange {
    pub status: Option<ValueChange>,
    pub state: Option<ValueChange>,
}

impl Lifecycle {
    pub fn new(status: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            state: state.into(),
        }
    }

    /// Compare against a desired pair. Comparison is case-sensitive.
    pub fn changes_to(&self, desired: &Lifecycle) -> LifecycleChange {
        let diff = |from: &str, to: &str| {
            (from != to).then(|| ValueChange {
                from: from.to_string(),
                to: to.to_string(),
            })
        };

        LifecycleChange {
            status: diff(&self.status, &desired.status),
            state: diff(&self.state, &desired.state),
        }
    }
}

impl LifecycleChange {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.state.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_change() {
        let current = Lifecycle::new("Allocated", "RUNNING");
        let change = current.changes_to(&Lifecycle::new("Maintenance", "RUNNING"));

        assert!(change.state.is_none());
        assert_eq!(
            change.status,
            Some(ValueChange {
                from: "Allocated".to_string(),
                to: "Maintenance".to_string(),
            })
        );
    }

    #[test]
    fn test_identical_pair_is_empty() {
        let current = Lifecycle::new("Allocated", "RUNNING");
        assert!(current.changes_to(&current.clone()).is_empty());
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let current = Lifecycle::new("Allocated", "RUNNING");
        let change = current.changes_to(&Lifecycle::new("ALLOCATED", "RUNNING"));
        assert!(change.status.is_some());
    }
}
