//! # Error Handling
//!
//! Error types for the mesh configuration model.
//!
//! The model layer has exactly one failure mode: converting an external
//! string into a closed enumeration ([`InvalidEnumValue`]). Everything else
//! in [`AppMeshError`] belongs to the operation surface in [`crate::services`].

pub mod enum_value;
pub mod types;

pub use enum_value::InvalidEnumValue;
pub use types::{AppMeshError, Result};
