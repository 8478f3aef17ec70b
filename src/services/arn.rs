//! Resource ARN minting
//!
//! ```text
//! arn:{partition}:appmesh:{region}:{account}:mesh/{mesh}
//!     .../virtualNode/{node}
//!     .../virtualRouter/{router}
//!     .../virtualRouter/{router}/route/{route}
//!     .../virtualService/{service}
//! ```

use crate::config::ServiceConfig;

/// Builds ARNs for one partition, region and account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArnBuilder {
    prefix: String,
}

impl ArnBuilder {
    pub fn new(config: &ServiceConfig) -> Self {
        Self { prefix: config.arn_prefix() }
    }

    pub fn mesh(&self, mesh_name: &str) -> String {
        format!("{}:mesh/{}", self.prefix, mesh_name)
    }

    pub fn virtual_node(&self, mesh_name: &str, virtual_node_name: &str) -> String {
        format!("{}/virtualNode/{}", self.mesh(mesh_name), virtual_node_name)
    }

    pub fn virtual_router(&self, mesh_name: &str, virtual_router_name: &str) -> String {
        format!("{}/virtualRouter/{}", self.mesh(mesh_name), virtual_router_name)
    }

    pub fn route(&self, mesh_name: &str, virtual_router_name: &str, route_name: &str) -> String {
        format!("{}/route/{}", self.virtual_router(mesh_name, virtual_router_name), route_name)
    }

    pub fn virtual_service(&self, mesh_name: &str, virtual_service_name: &str) -> String {
        format!("{}/virtualService/{}", self.mesh(mesh_name), virtual_service_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ArnBuilder {
        ArnBuilder::new(&ServiceConfig {
            region: "us-west-2".to_string(),
            account_id: "123456789012".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_resource_arns() {
        let arns = builder();
        assert_eq!(arns.mesh("shop"), "arn:aws:appmesh:us-west-2:123456789012:mesh/shop");
        assert_eq!(
            arns.virtual_node("shop", "orders-v1"),
            "arn:aws:appmesh:us-west-2:123456789012:mesh/shop/virtualNode/orders-v1"
        );
        assert_eq!(
            arns.route("shop", "orders-router", "default"),
            "arn:aws:appmesh:us-west-2:123456789012:mesh/shop/virtualRouter/orders-router/route/default"
        );
        assert_eq!(
            arns.virtual_service("shop", "orders.shop.local"),
            "arn:aws:appmesh:us-west-2:123456789012:mesh/shop/virtualService/orders.shop.local"
        );
    }
}
