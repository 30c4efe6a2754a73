//! Bizfly Cloud Provider
//!
//! Provider implementation for Bizfly Cloud.
//!
//! ## Module Structure
//!
//! - `client` - Remote API capabilities consumed by the provider
//! - `config` - Provider configuration
//! - `resources` - Managed resources (`vpc_network`)
//! - `data_sources` - Data sources (`cloud_database_schedule`)

pub mod client;
pub mod config;
pub mod data_sources;
pub mod resources;

#[cfg(test)]
mod mock;

pub use client::{BizflyClient, ClientError, ScheduleService, VpcService};
pub use config::{ConfigError, ProviderConfig};

use bizfly_core::provider::{BoxFuture, Provider, ProviderError, ProviderResult, ResourceType};
use bizfly_core::resource::{Resource, ResourceId, State};
use log::debug;

use data_sources::database_schedule::{self, DatabaseScheduleDataSource, DatabaseScheduleType};
use resources::vpc_network::{self, VpcNetworkResource, VpcNetworkType};

/// Bizfly Cloud Provider
pub struct BizflyProvider {
    config: ProviderConfig,
    vpc_networks: VpcNetworkResource,
    database_schedules: DatabaseScheduleDataSource,
}

impl BizflyProvider {
    /// Create a provider from its configuration and the client capabilities
    pub fn new(config: ProviderConfig, client: BizflyClient) -> Self {
        debug!(
            "Configuring bizfly provider for region {} at {}",
            config.region_name, config.api_endpoint
        );
        Self {
            config,
            vpc_networks: VpcNetworkResource::new(client.vpc),
            database_schedules: DatabaseScheduleDataSource::new(client.schedules),
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Check configured attributes against the type schema
fn validate(resource: &Resource, resource_type: &dyn ResourceType) -> ProviderResult<()> {
    resource_type
        .schema()
        .validate(&resource.attributes)
        .map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ProviderError::new(format!("Invalid attributes: {}", messages.join("; ")))
                .for_resource(resource.id.clone())
        })
}

fn unsupported(id: &ResourceId) -> ProviderError {
    let message = if id.resource_type == database_schedule::DATA_SOURCE_TYPE {
        format!("{} is a data source and can only be read", id.resource_type)
    } else {
        format!("Unknown resource type: {}", id.resource_type)
    };
    ProviderError::new(message).for_resource(id.clone())
}

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for BizflyProvider {
    fn name(&self) -> &'static str {
        "bizfly"
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        resources::resource_types()
    }

    fn data_source_types(&self) -> Vec<Box<dyn ResourceType>> {
        data_sources::data_source_types()
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.map(|s| s.to_string());
        Box::pin(async move {
            match id.resource_type.as_str() {
                vpc_network::RESOURCE_TYPE => {
                    self.vpc_networks.read(&id, identifier.as_deref()).await
                }
                _ => Err(unsupported(&id)),
            }
        })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move {
            match resource.id.resource_type.as_str() {
                vpc_network::RESOURCE_TYPE => {
                    validate(&resource, &VpcNetworkType)?;
                    self.vpc_networks.create(&resource).await
                }
                _ => Err(unsupported(&resource.id)),
            }
        })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let from = from.clone();
        let to = to.clone();
        Box::pin(async move {
            match id.resource_type.as_str() {
                vpc_network::RESOURCE_TYPE => {
                    validate(&to, &VpcNetworkType)?;
                    self.vpc_networks
                        .update(&id, &identifier, &from, &to)
                        .await
                }
                _ => Err(unsupported(&id)),
            }
        })
    }

    fn delete(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move {
            match id.resource_type.as_str() {
                vpc_network::RESOURCE_TYPE => self.vpc_networks.delete(&id, &identifier).await,
                _ => Err(unsupported(&id)),
            }
        })
    }

    fn read_data_source(
        &self,
        resource: &Resource,
        identifier: Option<&str>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        let identifier = identifier.map(|s| s.to_string());
        Box::pin(async move {
            match resource.id.resource_type.as_str() {
                database_schedule::DATA_SOURCE_TYPE => {
                    validate(&resource, &DatabaseScheduleType)?;
                    self.database_schedules
                        .read(&resource, identifier.as_deref())
                        .await
                }
                other => Err(ProviderError::new(format!("Unknown data source type: {}", other))
                    .for_resource(resource.id.clone())),
            }
        })
    }
}
