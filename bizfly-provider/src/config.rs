//! Provider configuration
//!
//! Built either from a JSON document or from the attributes of a
//! `provider bizfly { ... }` block.

use std::collections::HashMap;

use bizfly_core::resource::Value;
use serde::Deserialize;

pub const DEFAULT_REGION: &str = "HaNoi";
pub const DEFAULT_API_ENDPOINT: &str = "https://manage.bizflycloud.vn";

/// Regions accepted by the remote API
pub const REGIONS: &[&str] = &["HaNoi", "HoChiMinh"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported region '{region}', expected one of: {}", REGIONS.join(", "))]
    UnsupportedRegion { region: String },

    #[error("Invalid API endpoint '{0}': must start with http:// or https://")]
    InvalidEndpoint(String),

    #[error("Attribute '{name}' must be a {expected}")]
    InvalidAttribute { name: String, expected: &'static str },

    #[error("Failed to parse provider configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub region_name: String,
    pub api_endpoint: String,
    pub project_id: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            region_name: DEFAULT_REGION.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            project_id: None,
        }
    }
}

impl ProviderConfig {
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()
    }

    pub fn from_attributes(attributes: &HashMap<String, Value>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(region) = string_attribute(attributes, "region_name")? {
            config.region_name = region;
        }
        if let Some(endpoint) = string_attribute(attributes, "api_endpoint")? {
            config.api_endpoint = endpoint;
        }
        config.project_id = string_attribute(attributes, "project_id")?;
        config.validate()
    }

    /// Normalize the region and check the endpoint
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.region_name = normalize_region(&self.region_name)?;
        if !(self.api_endpoint.starts_with("https://") || self.api_endpoint.starts_with("http://"))
        {
            return Err(ConfigError::InvalidEndpoint(self.api_endpoint));
        }
        self.api_endpoint = self.api_endpoint.trim_end_matches('/').to_string();
        Ok(self)
    }
}

fn string_attribute(
    attributes: &HashMap<String, Value>,
    name: &str,
) -> Result<Option<String>, ConfigError> {
    match attributes.get(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ConfigError::InvalidAttribute {
            name: name.to_string(),
            expected: "string",
        }),
    }
}

/// Normalize region value (e.g., "bizfly.Region.ho_chi_minh" -> "HoChiMinh")
pub fn normalize_region(s: &str) -> Result<String, ConfigError> {
    let region_part = s.split('.').next_back().unwrap_or(s);
    let key: String = region_part
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase();

    REGIONS
        .iter()
        .find(|r| r.to_lowercase() == key)
        .map(|r| r.to_string())
        .ok_or_else(|| ConfigError::UnsupportedRegion {
            region: s.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_region() {
        assert_eq!(normalize_region("HaNoi").unwrap(), "HaNoi");
        assert_eq!(normalize_region("bizfly.Region.ho_chi_minh").unwrap(), "HoChiMinh");
        assert_eq!(normalize_region("ha-noi").unwrap(), "HaNoi");
        assert!(matches!(
            normalize_region("Singapore"),
            Err(ConfigError::UnsupportedRegion { .. })
        ));
    }

    #[test]
    fn defaults_from_empty_json() {
        let config = ProviderConfig::from_json(json!({})).unwrap();
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn from_json_normalizes() {
        let config = ProviderConfig::from_json(json!({
            "region_name": "ho_chi_minh",
            "api_endpoint": "https://example.test/",
            "project_id": "p-1"
        }))
        .unwrap();

        assert_eq!(config.region_name, "HoChiMinh");
        assert_eq!(config.api_endpoint, "https://example.test");
        assert_eq!(config.project_id.as_deref(), Some("p-1"));
    }

    #[test]
    fn rejects_bad_endpoint() {
        let err = ProviderConfig::from_json(json!({"api_endpoint": "ftp://x"})).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ProviderConfig::from_json(json!({"region_name": 3})).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_provider_block_attributes() {
        let mut attrs = HashMap::new();
        attrs.insert(
            "region_name".to_string(),
            Value::from("bizfly.Region.ho_chi_minh"),
        );
        attrs.insert("project_id".to_string(), Value::from("p-1"));

        let config = ProviderConfig::from_attributes(&attrs).unwrap();
        assert_eq!(config.region_name, "HoChiMinh");
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.project_id.as_deref(), Some("p-1"));

        attrs.insert("api_endpoint".to_string(), Value::Bool(true));
        assert!(matches!(
            ProviderConfig::from_attributes(&attrs),
            Err(ConfigError::InvalidAttribute { .. })
        ));
    }
}
