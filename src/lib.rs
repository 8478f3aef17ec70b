//! # appmesh-model
//!
//! Typed configuration model for a service mesh control plane: meshes,
//! virtual nodes, virtual routers, virtual services and routes, together
//! with the request/result envelopes of the operations that manage them.
//!
//! ## Architecture
//!
//! ```text
//! caller → api::XRequest → services::AppMesh → api::XResult
//!                               ↓
//!                 validation (field + business rules)
//!                               ↓
//!                      domain value types
//! ```
//!
//! ## Core Components
//!
//! - **Domain**: plain value types with strict wire enums and one-of unions
//! - **API**: one request and one result type per operation, `validator`-derived
//! - **Services**: the [`AppMesh`] trait and the [`InMemoryAppMesh`] backend
//! - **Config / Observability**: layered configuration and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use appmesh_model::{AppMesh, CreateMeshRequest, InMemoryAppMesh, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let backend = InMemoryAppMesh::default();
//!     let created = backend.create_mesh(CreateMeshRequest::new("shop")).await?;
//!     println!("{}", created.mesh.metadata.arn);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod services;
pub mod validation;

// Re-export commonly used types and traits
pub use api::*;
pub use crate::config::{load_config, AppConfig};
pub use domain::*;
pub use errors::{AppMeshError, InvalidEnumValue, Result};
pub use observability::init_logging;
pub use services::{AppMesh, InMemoryAppMesh};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "appmesh-model");
    }
}
