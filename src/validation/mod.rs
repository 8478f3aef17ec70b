//! # Validation Module
//!
//! Two-layer validation of incoming requests:
//! 1. Field validation derived with the `validator` crate on the request
//!    envelopes (name lengths, list limits, tag bounds)
//! 2. Business rules on resource specs (weights, ports, protocol
//!    consistency, pattern compilation)
//!
//! Both layers report failures as [`AppMeshError::BadRequest`] with the
//! offending field path.

use validator::Validate;

use crate::errors::{AppMeshError, Result};

pub mod business_rules;

pub use business_rules::*;

/// Run the derived field validation of a request.
pub fn validate_request<T: Validate>(request: &T) -> Result<()> {
    request.validate().map_err(|errors| AppMeshError::from_request_validation(&errors))
}
