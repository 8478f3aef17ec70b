//! # Observability Infrastructure
//!
//! Structured logging for the mesh backend: a `tracing-subscriber`
//! registry with an `EnvFilter` and optional JSON output, plus the span
//! macros used around operations.

pub mod logging;

pub use logging::log_config_info;

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::errors::{AppMeshError, Result};

/// Install the global logging subscriber.
///
/// `RUST_LOG` wins over the configured level. Returns `false` when a
/// subscriber was already installed, so calling this twice is harmless.
pub fn init_logging(config: &ObservabilityConfig) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            AppMeshError::config_with_source(
                format!("Invalid log level '{}'", config.log_level),
                Box::new(e),
            )
        })?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json_logging {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::info!(
            service_name = %config.service_name,
            log_level = %config.log_level,
            json_logging = config.json_logging,
            "Logging initialized"
        );
    }

    Ok(installed)
}
