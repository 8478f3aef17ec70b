//! # Structured Logging
//!
//! Span macros and startup logging built on the tracing ecosystem.
//! Backends open one span per operation; events inside it inherit the
//! operation name and a fresh operation id.

/// Create a tracing span for a mesh operation.
///
/// ```rust,ignore
/// let span = operation_span!("CreateMesh", mesh_name = %request.mesh_name);
/// ```
#[macro_export]
macro_rules! operation_span {
    ($operation:expr) => {
        tracing::info_span!(
            "appmesh_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4()
        )
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::info_span!(
            "appmesh_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::AppConfig) {
    tracing::info!(
        service_name = %config.observability.service_name,
        partition = %config.service.partition,
        region = %config.service.region,
        account_id = %config.service.account_id,
        max_page_limit = config.service.max_page_limit,
        max_tags_per_resource = config.service.max_tags_per_resource,
        json_logging = config.observability.json_logging,
        "App Mesh backend configuration"
    );
}
