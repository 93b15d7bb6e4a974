// Copyright (c) 2025 - Cowboy AI, Inc.
//! Attribute Access Engine
//!
//! Reads and writes named facts about an asset.
//!
//! # Get
//!
//! The shape of the answer follows the shape of the request, not its size:
//! one bare field gives a scalar, an ordered list (even of one field) gives a
//! [`FieldValues`] map that also carries the resolved asset.
//!
//! # Set
//!
//! An [`AttributeUpdate`] is applied field by field, in insertion order:
//!
//! 1. The asset comes from the update itself or from the subject.
//! 2. A server node recorded in another datacenter is dropped unless
//!    inter-DC mode is on; every field then takes the "no asset" branch.
//! 3. `status` (with or without `state`) drives a lifecycle transition,
//!    free-form fields are upper-cased and pushed when they differ.
//!
//! A refused write aborts the call immediately. Fields already written in the
//! same call stay written: there is no rollback.

use std::collections::HashMap;
use tracing::debug;

use super::CollinsContext;
use crate::capability::CollinsAsset;
use crate::domain::{Asset, Lifecycle, StateDefinition};
use crate::errors::{AssetSyncError, AssetSyncResult};
use crate::inventory::InventoryClient;

/// Reason attached to every status transition
pub const AUDIT_COMMENT: &str = "changed through jetpants";

const ASSET_FIELD: &str = "asset";
const STATUS_FIELD: &str = "status";
const STATE_FIELD: &str = "state";

/// How fields were requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRequest {
    /// Fields passed as bare arguments
    Bare(Vec<String>),
    /// Fields passed as one ordered collection
    List(Vec<String>),
}

impl FieldRequest {
    pub fn bare<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Bare(fields.into_iter().map(Into::into).collect())
    }

    pub fn list<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(fields.into_iter().map(Into::into).collect())
    }
}

/// Answer to a [`FieldRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetResult {
    Value(String),
    Fields(FieldValues),
}

/// Requested field values plus the asset they were read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<String, String>,
    asset: Option<Asset>,
}

impl FieldValues {
    /// Value of a requested field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .get(&field.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The resolved asset; present as an entry even when `None`
    pub fn asset(&self) -> Option<&Asset> {
        self.asset.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct requested fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered field/value pairs to write, plus an optional explicit asset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeUpdate {
    asset: Option<Asset>,
    fields: Vec<(String, String)>,
}

impl AttributeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this asset instead of resolving the subject
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Set a field. Setting a field again replaces its value and keeps its
    /// original position.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        let field = field.to_ascii_lowercase();
        let value = value.into();

        if field == ASSET_FIELD {
            return self;
        }
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    /// Set a field that may be absent; absent means the empty value
    pub fn with_optional(self, field: &str, value: Option<&str>) -> Self {
        self.with(field, value.unwrap_or_default())
    }

    pub fn asset(&self) -> Option<&Asset> {
        self.asset.as_ref()
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn value_of(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn read_field(asset: Option<&Asset>, field: &str) -> String {
    asset.and_then(|a| a.field(field)).unwrap_or_default()
}

impl<C: InventoryClient> CollinsContext<C> {
    /// Resolve a subject through its capability contract
    pub async fn resolve<S>(&self, subject: &S) -> AssetSyncResult<Option<Asset>>
    where
        S: CollinsAsset + ?Sized,
    {
        subject.collins_asset(&self.client).await
    }

    /// Read fields, answering in the shape they were asked for
    ///
    /// `Bare` with no fields is a no-op and returns `None`.
    pub async fn get_fields<S>(
        &self,
        subject: &S,
        request: FieldRequest,
    ) -> AssetSyncResult<Option<GetResult>>
    where
        S: CollinsAsset + ?Sized,
    {
        match request {
            FieldRequest::Bare(fields) if fields.is_empty() => Ok(None),
            FieldRequest::Bare(fields) if fields.len() == 1 => {
                let value = self.get(subject, &fields[0]).await?;
                Ok(Some(GetResult::Value(value)))
            }
            FieldRequest::Bare(fields) | FieldRequest::List(fields) => {
                let values = self.get_many(subject, fields.as_slice()).await?;
                Ok(Some(GetResult::Fields(values)))
            }
        }
    }

    /// Value of one field as stored; empty when there is no asset
    pub async fn get<S>(&self, subject: &S, field: &str) -> AssetSyncResult<String>
    where
        S: CollinsAsset + ?Sized,
    {
        let asset = self.resolve(subject).await?;
        Ok(read_field(asset.as_ref(), field))
    }

    /// Values of several fields together with the resolved asset
    pub async fn get_many<S, F>(&self, subject: &S, fields: &[F]) -> AssetSyncResult<FieldValues>
    where
        S: CollinsAsset + ?Sized,
        F: AsRef<str>,
    {
        let asset = self.resolve(subject).await?;
        let values = fields
            .iter()
            .map(|field| {
                let field = field.as_ref().to_ascii_lowercase();
                let value = read_field(asset.as_ref(), &field);
                (field, value)
            })
            .collect();

        Ok(FieldValues { values, asset })
    }

    /// Apply an update, field by field
    pub async fn set<S>(&self, subject: &S, update: AttributeUpdate) -> AssetSyncResult<()>
    where
        S: CollinsAsset + ?Sized,
    {
        let label = subject.to_string();
        let asset = match update.asset() {
            Some(asset) => Some(asset.clone()),
            None => self.resolve(subject).await?,
        };
        let asset = asset.filter(|asset| {
            let permitted = self.locality.permits_mutation(asset);
            if !permitted {
                debug!(
                    "{}: ignoring {} asset {} in {:?}, this process runs in {}",
                    label,
                    self.client.name(),
                    asset.tag,
                    asset.location,
                    self.locality.current_datacenter()
                );
            }
            permitted
        });

        let desired_status = update.value_of(STATUS_FIELD);
        let desired_state = update.value_of(STATE_FIELD);

        for (field, value) in update.fields() {
            match field.as_str() {
                STATUS_FIELD => {
                    self.apply_status(&label, asset.as_ref(), value, desired_state)
                        .await?
                }
                STATE_FIELD => {
                    self.apply_state(&label, asset.as_ref(), value, desired_status.is_some())?
                }
                _ => {
                    self.apply_attribute(&label, asset.as_ref(), field, value)
                        .await?
                }
            }
        }

        Ok(())
    }

    async fn apply_status(
        &self,
        label: &str,
        asset: Option<&Asset>,
        status: &str,
        state: Option<&str>,
    ) -> AssetSyncResult<()> {
        let Some(asset) = asset else {
            self.emit(
                label,
                &format!("WARNING: unable to set Collins status to {}", status),
            );
            return Ok(());
        };

        let Some(state) = state else {
            return self.apply_plain_status(label, asset, status).await;
        };

        let change = asset.lifecycle().changes_to(&Lifecycle::new(status, state));
        if change.is_empty() {
            return Ok(());
        }

        let mut accepted = self
            .client
            .set_status(asset, status, Some(AUDIT_COMMENT), Some(state))
            .await?;
        if !accepted {
            debug!(
                "{}: {} refused {}/{}, registering state definition",
                label,
                self.client.name(),
                status,
                state
            );
            let definition = StateDefinition::for_pairing(state, status);
            if !self.client.create_state(&definition).await? {
                debug!(
                    "{}: {} refused state definition {}",
                    label,
                    self.client.name(),
                    state
                );
            }
            accepted = self
                .client
                .set_status(asset, status, Some(AUDIT_COMMENT), Some(state))
                .await?;
        }
        if !accepted {
            return Err(AssetSyncError::StateTransition {
                state: state.to_string(),
                status: status.to_string(),
            });
        }

        if let Some(state) = change.state {
            self.emit(
                label,
                &format!("Collins state changed from {} to {}", state.from, state.to),
            );
        }
        if let Some(status) = change.status {
            self.emit(
                label,
                &format!("Collins status changed from {} to {}", status.from, status.to),
            );
        }
        Ok(())
    }

    async fn apply_plain_status(
        &self,
        label: &str,
        asset: &Asset,
        status: &str,
    ) -> AssetSyncResult<()> {
        if asset.status == status {
            return Ok(());
        }

        let accepted = self
            .client
            .set_status(asset, status, Some(AUDIT_COMMENT), None)
            .await?;
        if !accepted {
            return Err(AssetSyncError::StatusTransition {
                status: status.to_string(),
            });
        }

        self.emit(
            label,
            &format!(
                "Collins status changed from {} to {}",
                asset.status, status
            ),
        );
        Ok(())
    }

    /// `state` is only ever written together with `status`
    fn apply_state(
        &self,
        label: &str,
        asset: Option<&Asset>,
        state: &str,
        status_present: bool,
    ) -> AssetSyncResult<()> {
        if !status_present {
            return Err(AssetSyncError::StateWithoutStatus {
                state: state.to_string(),
            });
        }

        // the status branch performs the transition; only anomalies surface here
        match asset {
            Some(asset) if !asset.status.is_empty() => {}
            _ => self.emit(
                label,
                &format!("WARNING: unable to set Collins state to {}", state),
            ),
        }

        Ok(())
    }

    async fn apply_attribute(
        &self,
        label: &str,
        asset: Option<&Asset>,
        field: &str,
        value: &str,
    ) -> AssetSyncResult<()> {
        let name = field.to_ascii_uppercase();
        let value = value.to_ascii_uppercase();

        let Some(asset) = asset else {
            self.emit(
                label,
                &format!("WARNING: unable to set Collins attribute {} to {}", name, value),
            );
            return Ok(());
        };

        let previous = asset.field(field).unwrap_or_default();
        if previous == value {
            return Ok(());
        }

        if !self.client.set_attribute(asset, &name, &value).await? {
            return Err(AssetSyncError::AttributeWrite { field: name, value });
        }

        let notice = if value.is_empty() {
            format!("Collins attribute {} removed (was: {})", name, previous)
        } else if previous.is_empty() {
            format!("Collins attribute {} set to {}", name, value)
        } else {
            format!("Collins attribute {} changed from {} to {}", name, previous, value)
        };
        self.emit(label, &notice);
        Ok(())
    }
}
