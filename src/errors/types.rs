//! # Error Types
//!
//! Operation error taxonomy for the mesh configuration surface using `thiserror`.

use super::enum_value::InvalidEnumValue;

/// Custom result type for mesh operations
pub type Result<T> = std::result::Result<T, AppMeshError>;

/// Main error type for mesh configuration operations
#[derive(thiserror::Error, Debug)]
pub enum AppMeshError {
    /// The request was malformed or violated a documented constraint
    #[error("Bad request: {message}")]
    BadRequest { message: String, field: Option<String> },

    /// A resource with the same name already exists
    #[error("Conflict: {message}")]
    Conflict { message: String, resource_type: String },

    /// The caller is not allowed to perform the operation
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Unexpected failure on the service side
    #[error("Internal server error: {message}")]
    InternalServerError { message: String },

    /// An account or mesh quota would be exceeded
    #[error("Limit exceeded: {message}")]
    LimitExceeded { message: String },

    /// The named resource does not exist
    #[error("Resource not found: {resource_type} '{name}'")]
    NotFound { resource_type: String, name: String },

    /// The resource still has dependents and cannot be deleted
    #[error("Resource in use: {resource_type} '{name}': {message}")]
    ResourceInUse { resource_type: String, name: String, message: String },

    /// The service is temporarily unavailable
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String, retry_after: Option<u64> },

    /// The caller is being throttled
    #[error("Too many requests: {message}")]
    TooManyRequests { message: String, retry_after: Option<u64> },

    /// Tagging would exceed the per-resource tag limit
    #[error("Too many tags: {resource_arn} would carry {count} tags (max {max})")]
    TooManyTags { resource_arn: String, count: usize, max: usize },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// A closed enumeration lookup failed
    #[error(transparent)]
    InvalidEnumValue(#[from] InvalidEnumValue),
}

impl AppMeshError {
    /// Create a bad request error
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest { message: message.into(), field: None }
    }

    /// Create a bad request error with field information
    pub fn bad_request_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::BadRequest { message: message.into(), field: Some(field.into()) }
    }

    /// Create a conflict error
    pub fn conflict<M: Into<String>, R: Into<String>>(message: M, resource_type: R) -> Self {
        Self::Conflict { message: message.into(), resource_type: resource_type.into() }
    }

    /// Create a forbidden error
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden { message: message.into() }
    }

    /// Create an internal server error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::InternalServerError { message: message.into() }
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded<S: Into<String>>(message: S) -> Self {
        Self::LimitExceeded { message: message.into() }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, N: Into<String>>(resource_type: R, name: N) -> Self {
        Self::NotFound { resource_type: resource_type.into(), name: name.into() }
    }

    /// Create a resource-in-use error
    pub fn resource_in_use<R: Into<String>, N: Into<String>, M: Into<String>>(
        resource_type: R,
        name: N,
        message: M,
    ) -> Self {
        Self::ResourceInUse {
            resource_type: resource_type.into(),
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a service unavailable error
    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable { message: message.into(), retry_after: None }
    }

    /// Create a throttling error
    pub fn too_many_requests<S: Into<String>>(message: S) -> Self {
        Self::TooManyRequests { message: message.into(), retry_after: None }
    }

    /// Create a tag limit error
    pub fn too_many_tags<A: Into<String>>(resource_arn: A, count: usize, max: usize) -> Self {
        Self::TooManyTags { resource_arn: resource_arn.into(), count, max }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Get the HTTP status code the service answers with for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AppMeshError::BadRequest { .. } => 400,
            AppMeshError::Conflict { .. } => 409,
            AppMeshError::Forbidden { .. } => 403,
            AppMeshError::InternalServerError { .. } => 500,
            AppMeshError::LimitExceeded { .. } => 400,
            AppMeshError::NotFound { .. } => 404,
            AppMeshError::ResourceInUse { .. } => 409,
            AppMeshError::ServiceUnavailable { .. } => 503,
            AppMeshError::TooManyRequests { .. } => 429,
            AppMeshError::TooManyTags { .. } => 400,
            AppMeshError::Config { .. } => 500,
            AppMeshError::Serialization { .. } => 400,
            AppMeshError::InvalidEnumValue(_) => 400,
        }
    }

    /// Check if this error should be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppMeshError::InternalServerError { .. }
                | AppMeshError::ServiceUnavailable { .. }
                | AppMeshError::TooManyRequests { .. }
        )
    }

    /// Wire name of the error, as the service reports it
    pub fn error_code(&self) -> &'static str {
        match self {
            AppMeshError::BadRequest { .. } => "BadRequestException",
            AppMeshError::Conflict { .. } => "ConflictException",
            AppMeshError::Forbidden { .. } => "ForbiddenException",
            AppMeshError::InternalServerError { .. } => "InternalServerErrorException",
            AppMeshError::LimitExceeded { .. } => "LimitExceededException",
            AppMeshError::NotFound { .. } => "NotFoundException",
            AppMeshError::ResourceInUse { .. } => "ResourceInUseException",
            AppMeshError::ServiceUnavailable { .. } => "ServiceUnavailableException",
            AppMeshError::TooManyRequests { .. } => "TooManyRequestsException",
            AppMeshError::TooManyTags { .. } => "TooManyTagsException",
            AppMeshError::Config { .. } => "ConfigurationError",
            AppMeshError::Serialization { .. } => "SerializationError",
            AppMeshError::InvalidEnumValue(_) => "InvalidEnumValue",
        }
    }
}

impl From<serde_json::Error> for AppMeshError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization { source: error, context: "JSON serialization failed".to_string() }
    }
}

impl From<config::ConfigError> for AppMeshError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for AppMeshError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::from_validation(&errors, |field| field.to_string())
    }
}

impl AppMeshError {
    /// Validation failure of a request envelope, reported with the camelCase
    /// field names the request carries on the wire.
    pub fn from_request_validation(errors: &validator::ValidationErrors) -> Self {
        Self::from_validation(errors, camel_case)
    }

    fn from_validation(errors: &validator::ValidationErrors, rename: fn(&str) -> String) -> Self {
        let mut messages = Vec::new();
        collect_validation_messages("", errors, rename, &mut messages);
        messages.sort();

        let field = if messages.len() == 1 {
            messages[0].split_once(':').map(|(field, _)| field.to_string())
        } else {
            None
        };

        Self::BadRequest { message: format!("Validation failed: {}", messages.join("; ")), field }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Flatten nested validator output into `path: message` entries.
fn collect_validation_messages(
    prefix: &str,
    errors: &validator::ValidationErrors,
    rename: fn(&str) -> String,
    out: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let field = rename(field);
        let path = if prefix.is_empty() { field } else { format!("{}.{}", prefix, field) };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or_else(|| e.code.to_string(), |m| m.to_string()))
                    .collect();
                out.push(format!("{}: {}", path, error_messages.join(", ")));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_messages(&path, nested, rename, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(&format!("{}[{}]", path, index), nested, rename, out);
                }
            }
        }
    }
}
