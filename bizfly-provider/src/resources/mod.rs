//! Managed resource types of the Bizfly provider

pub mod vpc_network;

use bizfly_core::provider::ResourceType;

pub use vpc_network::{VpcNetworkResource, VpcNetworkType};

/// Returns all managed resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(VpcNetworkType)]
}
