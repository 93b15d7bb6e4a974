// Copyright (c) 2025 - Cowboy AI, Inc.

//! Collins HTTP Client
//!
//! Implements [`InventoryClient`] against the Collins asset inventory REST API.
//!
//! # Endpoints
//!
//! ```text
//! get_asset(tag)         = GET  /api/asset/{tag}
//! find_assets(query)     = GET  /api/assets?details=true&...
//! set_status(asset, ..)  = POST /api/asset/{tag}/status
//! set_attribute(asset..) = POST /api/asset/{tag}            (value present)
//!                          DELETE /api/asset/{tag}/attribute/{name}
//! create_state(def)      = PUT  /api/state/{name}
//! health_check()         = GET  /api/ping
//! ```
//!
//! Collins answers with a `{"status": .., "data": {..}}` envelope. Client
//! errors (4xx) on writes mean the service refused the change and map to
//! `Ok(false)`; anything else unexpected is an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_asset_sync::adapters::CollinsClient;
//! use cim_asset_sync::config::CollinsConfig;
//! use cim_asset_sync::inventory::InventoryClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CollinsConfig::new("http://collins:9000", "blake", "admin:first");
//!     let client = CollinsClient::new(&config)?;
//!     client.health_check().await?;
//!
//!     let asset = client.get_asset("001234").await?;
//!     println!("{:?}", asset);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::config::CollinsConfig;
use crate::domain::{Asset, AssetState, StateDefinition};
use crate::errors::{AssetSyncError, AssetSyncResult};
use crate::inventory::{AssetQuery, InventoryClient};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct AssetDetails {
    #[serde(rename = "ASSET")]
    asset: AssetRecord,
    #[serde(rename = "ATTRIBS", default)]
    attribs: HashMap<String, HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct AssetRecord {
    tag: String,
    #[serde(rename = "TYPE")]
    asset_type: String,
    status: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    state: Option<StateRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct StateRecord {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssetPage {
    #[serde(rename = "Data", default)]
    data: Vec<AssetDetails>,
}

#[derive(Debug, Deserialize)]
struct WriteOutcome {
    #[serde(rename = "SUCCESS", default)]
    success: bool,
}

impl From<AssetDetails> for Asset {
    fn from(details: AssetDetails) -> Self {
        let record = details.asset;
        let mut asset = Asset::new(record.tag, record.asset_type, record.status);
        asset.location = record.location.filter(|l| !l.is_empty());
        asset.state = record.state.map(|s| AssetState {
            name: s.name,
            label: s.label,
            description: s.description,
        });

        // ATTRIBS is keyed by dimension ("0" for the default one)
        for values in details.attribs.into_values() {
            for (name, value) in values {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => continue,
                    other => other.to_string(),
                };
                asset.store_attribute(&name, value);
            }
        }
        asset
    }
}

/// Collins REST client
pub struct CollinsClient {
    config: CollinsConfig,
    client: Client,
}

impl CollinsClient {
    /// Create a client from validated configuration
    pub fn new(config: &CollinsConfig) -> AssetSyncResult<Self> {
        config.validate()?;
        info!("Connecting to Collins at {}", config.url);

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                AssetSyncError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.config.user, Some(&self.config.password))
    }

    fn asset_path(tag: &str) -> String {
        format!("/api/asset/{}", urlencoding::encode(tag))
    }

    /// Interpret the answer to a write: 2xx is parsed, 4xx is a refusal
    async fn write_outcome(operation: &str, response: Response) -> AssetSyncResult<bool> {
        let status = response.status();
        if status.is_success() {
            if status == StatusCode::CREATED {
                return Ok(true);
            }
            let outcome: Envelope<WriteOutcome> = response.json().await?;
            return Ok(outcome.data.success);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            warn!("Collins refused {}: {} {}", operation, status, body);
            Ok(false)
        } else {
            Err(AssetSyncError::UnexpectedResponse(format!(
                "{} returned {}: {}",
                operation, status, body
            )))
        }
    }
}

#[async_trait]
impl InventoryClient for CollinsClient {
    async fn get_asset(&self, tag: &str) -> AssetSyncResult<Option<Asset>> {
        let url = self.url(&Self::asset_path(tag));
        debug!("GET {}", url);

        let response = self.authed(self.client.get(&url)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let envelope: Envelope<AssetDetails> = response.json().await?;
                Ok(Some(envelope.data.into()))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AssetSyncError::UnexpectedResponse(format!(
                    "GET asset {} returned {}: {}",
                    tag, status, body
                )))
            }
        }
    }

    async fn find_assets(&self, query: &AssetQuery) -> AssetSyncResult<Vec<Asset>> {
        let mut params: Vec<(String, String)> = vec![("details".to_string(), "true".to_string())];
        for (field, value) in &query.params {
            let key = match field.to_ascii_lowercase().as_str() {
                "tag" | "type" | "status" | "state" => field.to_ascii_lowercase(),
                _ => "attribute".to_string(),
            };
            let value = if key == "attribute" {
                format!("{};{}", field.to_ascii_uppercase(), value)
            } else {
                value.clone()
            };
            params.push((key, value));
        }
        if query.remote_lookup {
            params.push(("remoteLookup".to_string(), "true".to_string()));
        }

        let url = self.url("/api/assets");
        debug!("GET {} {}", url, query);

        let response = self
            .authed(self.client.get(&url))
            .query(&params)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AssetSyncError::UnexpectedResponse(format!(
                "asset search {} returned {}: {}",
                query, status, body
            )));
        }

        let envelope: Envelope<AssetPage> = response.json().await?;
        Ok(envelope.data.data.into_iter().map(Asset::from).collect())
    }

    async fn set_status(
        &self,
        asset: &Asset,
        status: &str,
        reason: Option<&str>,
        state: Option<&str>,
    ) -> AssetSyncResult<bool> {
        let url = self.url(&format!("{}/status", Self::asset_path(&asset.tag)));
        let mut form = vec![("status", status)];
        if let Some(state) = state {
            form.push(("state", state));
        }
        if let Some(reason) = reason {
            form.push(("reason", reason));
        }
        debug!("POST {} {:?}", url, form);

        let response = self.authed(self.client.post(&url)).form(&form).send().await?;
        Self::write_outcome("status update", response).await
    }

    async fn set_attribute(
        &self,
        asset: &Asset,
        name: &str,
        value: &str,
    ) -> AssetSyncResult<bool> {
        let response = if value.is_empty() {
            let url = self.url(&format!(
                "{}/attribute/{}",
                Self::asset_path(&asset.tag),
                urlencoding::encode(name)
            ));
            debug!("DELETE {}", url);
            self.authed(self.client.delete(&url)).send().await?
        } else {
            let url = self.url(&Self::asset_path(&asset.tag));
            let attribute = format!("{};{}", name, value);
            debug!("POST {} attribute={}", url, attribute);
            self.authed(self.client.post(&url))
                .form(&[("attribute", attribute.as_str())])
                .send()
                .await?
        };
        Self::write_outcome("attribute update", response).await
    }

    async fn create_state(&self, definition: &StateDefinition) -> AssetSyncResult<bool> {
        let url = self.url(&format!(
            "/api/state/{}",
            urlencoding::encode(&definition.name)
        ));
        debug!("PUT {} {:?}", url, definition);

        let response = self
            .authed(self.client.put(&url))
            .form(&[
                ("label", definition.label.as_str()),
                ("description", definition.description.as_str()),
                ("status", definition.status.as_str()),
            ])
            .send()
            .await?;
        Self::write_outcome("state creation", response).await
    }

    async fn health_check(&self) -> AssetSyncResult<()> {
        let url = self.url("/api/ping");
        let response = self.authed(self.client.get(&url)).send().await.map_err(|e| {
            AssetSyncError::Transport(format!("Collins health check failed: {}", e))
        })?;

        if response.status().is_success() {
            debug!("Collins health check passed");
            Ok(())
        } else {
            Err(AssetSyncError::UnexpectedResponse(format!(
                "Collins returned status: {}",
                response.status()
            )))
        }
    }

    fn name(&self) -> &str {
        "collins-http"
    }
}
