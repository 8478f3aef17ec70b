//! # Configuration Settings
//!
//! Defines the configuration structure for the in-memory mesh backend.

use crate::errors::{AppMeshError, Result};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Service identity and limits
    #[validate(nested)]
    pub service: ServiceConfig,

    /// Logging configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(AppMeshError::from)?;

        self.validate_custom()?;

        Ok(())
    }

    /// Cross-field checks the validator crate cannot express
    fn validate_custom(&self) -> Result<()> {
        if self.service.default_page_limit > self.service.max_page_limit {
            return Err(AppMeshError::bad_request_field(
                "Default page limit cannot exceed the maximum page limit",
                "service.default_page_limit",
            ));
        }

        Ok(())
    }
}

/// Identity used to mint ARNs, plus per-request limits
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    /// ARN partition (`aws`, `aws-cn`, ...)
    #[validate(length(min = 1, message = "Partition cannot be empty"))]
    pub partition: String,

    /// Region embedded in ARNs
    #[validate(length(min = 1, message = "Region cannot be empty"))]
    pub region: String,

    /// Twelve-digit account identifier embedded in ARNs
    #[validate(custom(function = "validate_account_id"))]
    pub account_id: String,

    /// Page size used when a list request carries no limit
    #[validate(range(min = 1, max = 100, message = "Default page limit must be between 1 and 100"))]
    pub default_page_limit: i32,

    /// Largest page size honoured for resource lists
    #[validate(range(min = 1, max = 100, message = "Max page limit must be between 1 and 100"))]
    pub max_page_limit: i32,

    /// Maximum number of tags a single resource may carry
    #[validate(range(min = 1, max = 50, message = "Max tags per resource must be between 1 and 50"))]
    pub max_tags_per_resource: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            partition: "aws".to_string(),
            region: "us-east-1".to_string(),
            account_id: "000000000000".to_string(),
            default_page_limit: 100,
            max_page_limit: 100,
            max_tags_per_resource: 50,
        }
    }
}

impl ServiceConfig {
    /// ARN prefix shared by every resource, up to and including the account
    pub fn arn_prefix(&self) -> String {
        format!("arn:{}:appmesh:{}:{}", self.partition, self.region, self.account_id)
    }

    /// Effective page size for a requested limit
    pub fn page_limit(&self, requested: Option<i32>) -> usize {
        let limit = requested.unwrap_or(self.default_page_limit).min(self.max_page_limit).max(1);
        usize::try_from(limit).unwrap_or(1)
    }
}

fn validate_account_id(account_id: &str) -> std::result::Result<(), ValidationError> {
    if account_id.len() != 12 || !account_id.chars().all(|c| c.is_ascii_digit()) {
        let mut error = ValidationError::new("invalid_account_id");
        error.message = Some("Account ID must be 12 digits".into());
        return Err(error);
    }
    Ok(())
}

/// Observability configuration for structured logging
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Service name attached to log output
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "appmesh-model".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_arn_prefix() {
        let config = ServiceConfig {
            partition: "aws-cn".to_string(),
            region: "cn-north-1".to_string(),
            account_id: "123456789012".to_string(),
            ..Default::default()
        };
        assert_eq!(config.arn_prefix(), "arn:aws-cn:appmesh:cn-north-1:123456789012");
    }

    #[test]
    fn test_page_limit_clamping() {
        let config = ServiceConfig { default_page_limit: 25, max_page_limit: 50, ..Default::default() };
        assert_eq!(config.page_limit(None), 25);
        assert_eq!(config.page_limit(Some(10)), 10);
        assert_eq!(config.page_limit(Some(500)), 50);
        assert_eq!(config.page_limit(Some(0)), 1);

        // Unvalidated configs still yield a usable page size
        let broken = ServiceConfig { default_page_limit: -5, max_page_limit: 0, ..Default::default() };
        assert_eq!(broken.page_limit(None), 1);
        assert_eq!(broken.page_limit(Some(20)), 1);
    }

    #[test]
    fn test_config_validation_errors() {
        let mut config = AppConfig::default();
        config.service.account_id = "12345".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.service.default_page_limit = 80;
        config.service.max_page_limit = 40;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.service.max_tags_per_resource = 51;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.observability.log_level = String::new();
        assert!(config.validate().is_err());
    }
}
