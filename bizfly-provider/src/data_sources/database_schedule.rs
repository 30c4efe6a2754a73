//! cloud_database_schedule data source

use std::collections::HashMap;
use std::sync::Arc;

use bizfly_core::provider::{ProviderError, ProviderResult, ResourceType};
use bizfly_core::resource::{Resource, State, Value};
use bizfly_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use log::debug;

use crate::client::ScheduleService;

pub const DATA_SOURCE_TYPE: &str = "cloud_database_schedule";

pub struct DatabaseScheduleType;

impl ResourceType for DatabaseScheduleType {
    fn name(&self) -> &'static str {
        DATA_SOURCE_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(DATA_SOURCE_TYPE)
            .with_description("A backup schedule of a Bizfly cloud database.")
            .attribute(
                AttributeSchema::new("id", AttributeType::String)
                    .with_description("Identifier of the schedule to look up."),
            )
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .computed()
                    .with_description("Name of the schedule."),
            )
    }
}

pub struct DatabaseScheduleDataSource {
    client: Arc<dyn ScheduleService>,
}

impl DatabaseScheduleDataSource {
    pub fn new(client: Arc<dyn ScheduleService>) -> Self {
        Self { client }
    }

    /// Look up a schedule by the configured `id`, falling back to `identifier`
    pub async fn read(&self, resource: &Resource, identifier: Option<&str>) -> ProviderResult<State> {
        let schedule_id = resource
            .get_str("id")
            .filter(|s| !s.is_empty())
            .or(identifier.filter(|s| !s.is_empty()))
            .ok_or_else(|| {
                ProviderError::new("Database schedule id is not set")
                    .for_resource(resource.id.clone())
            })?;
        debug!("Reading database schedule: {}", schedule_id);

        let schedule = self.client.get(schedule_id).await.map_err(|e| {
            ProviderError::new(format!("Error describing database schedule {}", schedule_id))
                .with_cause(e)
                .for_resource(resource.id.clone())
        })?;
        debug!(
            "Found database schedule {} ({})",
            schedule.id, schedule.name
        );

        let mut attributes = HashMap::new();
        attributes.insert("id".to_string(), Value::String(schedule.id.clone()));
        attributes.insert("name".to_string(), Value::String(schedule.name));

        Ok(State::existing(resource.id.clone(), attributes).with_identifier(schedule.id))
    }
}
