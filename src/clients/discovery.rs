//! Application config and resource discovery

use super::accept_only;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::types::JsonValue;
use crate::url::UrlBuilder;
use crate::version::{media_type_for, parse_media_type_version};
use semver::Version;
use serde::{Deserialize, Serialize};

/// An application and the resources it publishes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailableApplication {
    /// Application id
    #[serde(default)]
    pub id: String,
    /// Application name
    #[serde(default)]
    pub name: String,
    /// Published resources
    #[serde(default)]
    pub resources: Vec<AvailableResource>,
}

/// A published resource
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailableResource {
    /// Resource name, e.g. `persons`
    pub name: String,
    /// Representations the resource is offered in
    #[serde(default)]
    pub representations: Vec<Representation>,
}

/// One representation of a resource
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Representation {
    /// Vendor media type, e.g. `application/vnd.hedtech.integration.v12.1.0+json`
    #[serde(rename = "X-Media-Type", alias = "x-media-type", default)]
    pub media_type: String,
    /// Supported HTTP methods
    #[serde(default)]
    pub methods: Vec<String>,
}

impl Representation {
    /// Version carried by the media type, if it has one
    pub fn version(&self) -> Option<Version> {
        parse_media_type_version(&self.media_type)
    }
}

/// Client for tenant metadata
pub struct DiscoveryClient<T: Transport> {
    transport: T,
    urls: UrlBuilder,
}

impl DiscoveryClient<HttpClient> {
    /// Build an authenticated client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(HttpClient::from_client_config(config)?, config))
    }
}

impl<T: Transport> DiscoveryClient<T> {
    /// Create a client over any transport
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            urls: UrlBuilder::new(config.effective_base_url()),
        }
    }

    /// The calling application's configuration
    pub async fn app_config(&self) -> Result<JsonValue> {
        self.transport
            .get(&accept_only("application/json"), &self.urls.app_config_url())
            .await?
            .json()
    }

    /// Every application in the tenant with its resources
    pub async fn available_resources(&self) -> Result<Vec<AvailableApplication>> {
        self.transport
            .get(
                &accept_only("application/json"),
                &self.urls.available_resources_url(),
            )
            .await?
            .json()
    }

    /// Versions published for a resource across all applications, ascending
    pub async fn versions_for(&self, resource: &str) -> Result<Vec<Version>> {
        let applications = self.available_resources().await?;
        let mut versions: Vec<Version> = applications
            .iter()
            .flat_map(|app| &app.resources)
            .filter(|r| r.name == resource)
            .flat_map(|r| &r.representations)
            .filter_map(Representation::version)
            .collect();
        versions.sort();
        versions.dedup();
        Ok(versions)
    }

    /// Accept header for the newest published version of a resource
    pub async fn latest_version_header(&self, resource: &str) -> Result<Option<String>> {
        Ok(self
            .versions_for(resource)
            .await?
            .last()
            .map(media_type_for))
    }
}
