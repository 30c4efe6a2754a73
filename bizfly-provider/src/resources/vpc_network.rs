//! vpc_network resource
//!
//! Maps the `vpc_network` attributes onto the VPC capability of the client.
//! Only `name` and `description` can be changed in place.

use std::collections::HashMap;
use std::sync::Arc;

use bizfly_core::provider::{ProviderError, ProviderResult, ResourceType};
use bizfly_core::resource::{Resource, ResourceId, State, Value};
use bizfly_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};
use log::{debug, warn};

use crate::client::{CreateVpcPayload, UpdateVpcPayload, Vpc, VpcService};

pub const RESOURCE_TYPE: &str = "vpc_network";

pub struct VpcNetworkType;

impl ResourceType for VpcNetworkType {
    fn name(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(RESOURCE_TYPE)
            .with_description("A VPC network in Bizfly Cloud.")
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .with_description("Name of the VPC network."),
            )
            .attribute(
                AttributeSchema::new("description", AttributeType::String)
                    .required()
                    .with_description("Description of the VPC network."),
            )
            .attribute(
                AttributeSchema::new("cidr", types::cidr())
                    .with_description("IPv4 range of the network. Only used at creation."),
            )
            .attribute(
                AttributeSchema::new("is_default", AttributeType::Bool).with_description(
                    "Whether this is the default network of the project. Only used at creation.",
                ),
            )
    }
}

/// Lifecycle handler for `vpc_network`
pub struct VpcNetworkResource {
    client: Arc<dyn VpcService>,
}

impl VpcNetworkResource {
    pub fn new(client: Arc<dyn VpcService>) -> Self {
        Self { client }
    }

    /// Create the network, then read it back to reconcile the full state
    pub async fn create(&self, resource: &Resource) -> ProviderResult<State> {
        let payload = CreateVpcPayload {
            name: required_str(resource, "name")?,
            description: required_str(resource, "description")?,
            cidr: resource.get_str("cidr").unwrap_or_default().to_string(),
            is_default: resource.get_bool("is_default").unwrap_or(false),
        };
        debug!("Create vpc network configuration: {:?}", payload);

        let network = self.client.create(&payload).await.map_err(|e| {
            ProviderError::new("Error creating vpc network")
                .with_cause(e)
                .for_resource(resource.id.clone())
        })?;
        debug!("Created vpc network {} with id {}", resource.id, network.id);

        // The network exists remotely from here on; its identity must survive a failed read
        match self.read(&resource.id, Some(&network.id)).await {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(
                    "Reading back vpc network {} failed, keeping create response: {}",
                    network.id, e
                );
                Ok(network_state(resource.id.clone(), &network.id, &network))
            }
        }
    }

    /// Read the network; a network the service no longer knows is not an error
    pub async fn read(&self, id: &ResourceId, identifier: Option<&str>) -> ProviderResult<State> {
        let Some(identifier) = identifier.filter(|s| !s.is_empty()) else {
            return Ok(State::not_found(id.clone()));
        };
        debug!("Reading vpc network {} ({})", id, identifier);

        match self.client.get(identifier).await {
            Ok(network) => Ok(network_state(id.clone(), identifier, &network)),
            Err(e) if e.is_not_found() => {
                warn!("vpc network id {} is not found, removing {} from state", identifier, id);
                Ok(State::not_found(id.clone()))
            }
            Err(e) => Err(ProviderError::new(format!(
                "Error retrieving vpc network {}",
                identifier
            ))
            .with_cause(e)
            .for_resource(id.clone())),
        }
    }

    /// Patch `name` and `description` when they differ from the last read state
    ///
    /// `cidr` and `is_default` are never sent: the update call does not take them.
    pub async fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> ProviderResult<State> {
        let patch = update_payload(from, to);
        if patch.is_empty() {
            debug!("No changes for vpc network {} ({})", id, identifier);
            return Ok(from.clone());
        }
        debug!("Update vpc network {} ({}): {:?}", id, identifier, patch);

        self.client.update(identifier, &patch).await.map_err(|e| {
            ProviderError::new(format!("Error updating vpc network {}", identifier))
                .with_cause(e)
                .for_resource(id.clone())
        })?;

        let mut state = from.clone().with_identifier(identifier);
        if let Some(name) = patch.name {
            state.attributes.insert("name".to_string(), Value::String(name));
        }
        if let Some(description) = patch.description {
            state
                .attributes
                .insert("description".to_string(), Value::String(description));
        }
        Ok(state)
    }

    pub async fn delete(&self, id: &ResourceId, identifier: &str) -> ProviderResult<()> {
        debug!("Deleting vpc network {} ({})", id, identifier);
        self.client.delete(identifier).await.map_err(|e| {
            ProviderError::new(format!("Error deleting vpc network {}", identifier))
                .with_cause(e)
                .for_resource(id.clone())
        })
    }
}

fn required_str(resource: &Resource, key: &str) -> ProviderResult<String> {
    resource.get_str(key).map(str::to_string).ok_or_else(|| {
        ProviderError::new(format!("Attribute '{}' is required", key))
            .for_resource(resource.id.clone())
    })
}

fn update_payload(from: &State, to: &Resource) -> UpdateVpcPayload {
    let changed = |key: &str| match to.get_str(key) {
        Some(desired) if from.get_str(key) != Some(desired) => Some(desired.to_string()),
        _ => None,
    };

    UpdateVpcPayload {
        name: changed("name"),
        description: changed("description"),
    }
}

fn network_state(id: ResourceId, identifier: &str, network: &Vpc) -> State {
    let mut attributes = HashMap::new();
    attributes.insert("name".to_string(), Value::String(network.name.clone()));
    attributes.insert(
        "description".to_string(),
        Value::String(network.description.clone()),
    );
    attributes.insert("is_default".to_string(), Value::Bool(network.is_default));

    State::existing(id, attributes).with_identifier(identifier)
}
