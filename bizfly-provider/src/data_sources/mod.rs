//! Data source types of the Bizfly provider

pub mod database_schedule;

use bizfly_core::provider::ResourceType;

pub use database_schedule::{DatabaseScheduleDataSource, DatabaseScheduleType};

/// Returns all data source types supported by this provider
pub fn data_source_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(DatabaseScheduleType)]
}
