//! Remote API client capabilities
//!
//! The provider never talks HTTP itself. It is handed implementations of the
//! capability traits below and only maps attributes onto their payloads.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error returned by the remote API client
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The remote object does not exist (anymore)
    #[error("Resource not found")]
    NotFound,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Request body for creating a VPC network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVpcPayload {
    pub name: String,
    pub description: String,
    pub cidr: String,
    pub is_default: bool,
}

/// Request body for updating a VPC network; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateVpcPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateVpcPayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// VPC network as returned by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vpc {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cidr: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Cloud database backup schedule as returned by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

/// VPC network capability
#[async_trait]
pub trait VpcService: Send + Sync {
    async fn create(&self, payload: &CreateVpcPayload) -> ClientResult<Vpc>;

    async fn get(&self, id: &str) -> ClientResult<Vpc>;

    async fn update(&self, id: &str, payload: &UpdateVpcPayload) -> ClientResult<Vpc>;

    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// Cloud database schedule capability
#[async_trait]
pub trait ScheduleService: Send + Sync {
    async fn get(&self, id: &str) -> ClientResult<Schedule>;
}

/// The capability groups consumed by the provider
#[derive(Clone)]
pub struct BizflyClient {
    pub vpc: Arc<dyn VpcService>,
    pub schedules: Arc<dyn ScheduleService>,
}

impl BizflyClient {
    pub fn new(vpc: Arc<dyn VpcService>, schedules: Arc<dyn ScheduleService>) -> Self {
        Self { vpc, schedules }
    }
}
