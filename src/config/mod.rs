//! # Configuration Management
//!
//! Layered configuration for the mesh backend: built-in defaults, then an
//! optional file (any format the `config` crate recognises by extension),
//! then `APPMESH_`-prefixed environment variables. Nested keys use a double
//! underscore, e.g. `APPMESH_SERVICE__REGION=eu-west-1`. The merged result
//! is validated before it is returned.

pub mod settings;

use std::path::Path;

use config::{Config, Environment, File};

use crate::errors::Result;
use crate::observability::log_config_info;

pub use settings::{AppConfig, ObservabilityConfig, ServiceConfig};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "APPMESH";

/// Load and validate configuration.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let defaults = Config::try_from(&AppConfig::default())?;

    let mut builder = Config::builder().add_source(defaults);

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config: AppConfig = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    config.validate()?;
    log_config_info(&config);

    Ok(config)
}
