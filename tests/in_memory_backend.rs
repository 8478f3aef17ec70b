//! Integration tests for the in-memory mesh backend
//!
//! Drives the backend through the public [`AppMesh`] trait the way a caller
//! would: build a mesh, wire nodes, routers, routes and services together,
//! then tear everything down in dependency order.

use std::sync::Arc;

use appmesh_model::{
    AppMesh, AppMeshError, Backend, CreateMeshRequest, CreateRouteRequest,
    CreateVirtualNodeRequest, CreateVirtualRouterRequest, CreateVirtualServiceRequest,
    DeleteMeshRequest, DeleteRouteRequest, DeleteVirtualNodeRequest, DeleteVirtualRouterRequest,
    DeleteVirtualServiceRequest, DescribeRouteRequest, DescribeVirtualNodeRequest, HttpRoute,
    HttpRouteMatch, InMemoryAppMesh, ListMeshesRequest, ListRoutesRequest,
    ListTagsForResourceRequest, ListVirtualNodesRequest, Listener, PortMapping, RouteSpec,
    RouteStatusCode, TagRef, TagResourceRequest, UntagResourceRequest, UpdateRouteRequest,
    VirtualNodeSpec, VirtualNodeStatusCode, VirtualRouterSpec, VirtualServiceProvider,
    VirtualServiceSpec, WeightedTarget,
};
use appmesh_model::config::ServiceConfig;
use tracing_test::traced_test;

const MESH: &str = "shop";
const ROUTER: &str = "orders-router";

fn node_spec(port: i32) -> VirtualNodeSpec {
    VirtualNodeSpec::default()
        .with_listener(Listener::new(PortMapping::http(port)))
        .with_backend(Backend::virtual_service("payments.shop.local"))
}

fn split(v1: i32, v2: i32) -> RouteSpec {
    RouteSpec::http(HttpRoute::new(
        HttpRouteMatch::prefix("/"),
        vec![WeightedTarget::new("orders-v1", v1), WeightedTarget::new("orders-v2", v2)],
    ))
}

async fn build_mesh(backend: &InMemoryAppMesh) {
    backend.create_mesh(CreateMeshRequest::new(MESH)).await.unwrap();
    for node in ["orders-v1", "orders-v2"] {
        backend
            .create_virtual_node(CreateVirtualNodeRequest::new(MESH, node, node_spec(8080)))
            .await
            .unwrap();
    }
    backend
        .create_virtual_router(CreateVirtualRouterRequest::new(
            MESH,
            ROUTER,
            VirtualRouterSpec::default().with_listener(PortMapping::http(8080)),
        ))
        .await
        .unwrap();
    backend
        .create_route(CreateRouteRequest::new(MESH, ROUTER, "default", split(90, 10)))
        .await
        .unwrap();
    backend
        .create_virtual_service(CreateVirtualServiceRequest::new(
            MESH,
            "orders.shop.local",
            VirtualServiceSpec::default()
                .with_provider(VirtualServiceProvider::virtual_router(ROUTER)),
        ))
        .await
        .unwrap();
}

#[tokio::test]
#[traced_test]
async fn test_full_mesh_lifecycle() {
    let backend = InMemoryAppMesh::default();
    build_mesh(&backend).await;
    assert!(logs_contain("Route created"));

    let route = backend
        .describe_route(DescribeRouteRequest::new(MESH, ROUTER, "default"))
        .await
        .unwrap()
        .route;
    assert_eq!(route.spec.total_weight(), 100);
    assert_eq!(
        route.metadata.arn,
        "arn:aws:appmesh:us-east-1:000000000000:mesh/shop/virtualRouter/orders-router/route/default"
    );

    // Shift traffic to v2
    let updated = backend
        .update_route(UpdateRouteRequest::new(MESH, ROUTER, "default", split(0, 100)))
        .await
        .unwrap()
        .route;
    assert_eq!(updated.metadata.version, 2);
    assert_eq!(updated.metadata.uid, route.metadata.uid);

    // Teardown in dependency order
    backend
        .delete_virtual_service(DeleteVirtualServiceRequest::new(MESH, "orders.shop.local"))
        .await
        .unwrap();
    let deleted = backend
        .delete_route(DeleteRouteRequest::new(MESH, ROUTER, "default"))
        .await
        .unwrap()
        .route;
    assert_eq!(deleted.status.status, Some(RouteStatusCode::Deleted));
    backend
        .delete_virtual_router(DeleteVirtualRouterRequest::new(MESH, ROUTER))
        .await
        .unwrap();
    for node in ["orders-v1", "orders-v2"] {
        let node = backend
            .delete_virtual_node(DeleteVirtualNodeRequest::new(MESH, node))
            .await
            .unwrap()
            .virtual_node;
        assert_eq!(node.status.status, Some(VirtualNodeStatusCode::Deleted));
    }
    backend.delete_mesh(DeleteMeshRequest::new(MESH)).await.unwrap();

    let meshes = backend.list_meshes(ListMeshesRequest::default()).await.unwrap();
    assert!(meshes.meshes.is_empty());
    assert!(logs_contain("Mesh deleted"));
}

#[tokio::test]
#[traced_test]
async fn test_dependents_block_deletes() {
    let backend = InMemoryAppMesh::default();
    build_mesh(&backend).await;

    let err = backend.delete_mesh(DeleteMeshRequest::new(MESH)).await.unwrap_err();
    assert!(matches!(err, AppMeshError::ResourceInUse { .. }));
    assert!(logs_contain("Request rejected"));

    // Router still has a route and still backs a virtual service
    let err = backend
        .delete_virtual_router(DeleteVirtualRouterRequest::new(MESH, ROUTER))
        .await
        .unwrap_err();
    assert!(matches!(err, AppMeshError::ResourceInUse { .. }));

    backend.delete_route(DeleteRouteRequest::new(MESH, ROUTER, "default")).await.unwrap();
    let err = backend
        .delete_virtual_router(DeleteVirtualRouterRequest::new(MESH, ROUTER))
        .await
        .unwrap_err();
    match err {
        AppMeshError::ResourceInUse { message, .. } => {
            assert!(message.contains("orders.shop.local"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_parents_are_not_found() {
    let backend = InMemoryAppMesh::default();

    let err = backend
        .create_virtual_node(CreateVirtualNodeRequest::new("nowhere", "orders-v1", node_spec(80)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppMeshError::NotFound { ref resource_type, .. } if resource_type == "mesh"));

    backend.create_mesh(CreateMeshRequest::new(MESH)).await.unwrap();
    let err = backend
        .create_route(CreateRouteRequest::new(MESH, "ghost-router", "default", split(50, 50)))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppMeshError::NotFound { ref resource_type, .. } if resource_type == "virtualRouter")
    );

    let err = backend
        .create_virtual_service(CreateVirtualServiceRequest::new(
            MESH,
            "orders.shop.local",
            VirtualServiceSpec::default()
                .with_provider(VirtualServiceProvider::virtual_node("ghost-node")),
        ))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppMeshError::NotFound { ref resource_type, .. } if resource_type == "virtualNode")
    );
}

#[tokio::test]
async fn test_invalid_specs_are_bad_requests() {
    let backend = InMemoryAppMesh::default();
    build_mesh(&backend).await;

    // Weights above 100 in total
    let err = backend
        .update_route(UpdateRouteRequest::new(MESH, ROUTER, "default", split(90, 90)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppMeshError::BadRequest { .. }));

    // Port out of range
    let err = backend
        .create_virtual_node(CreateVirtualNodeRequest::new(MESH, "orders-v3", node_spec(70000)))
        .await
        .unwrap_err();
    match err {
        AppMeshError::BadRequest { field, .. } => {
            assert_eq!(field.as_deref(), Some("spec.listeners[0].portMapping.port"))
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Empty name fails field validation
    let err = backend.create_mesh(CreateMeshRequest::new("")).await.unwrap_err();
    assert!(matches!(err, AppMeshError::BadRequest { .. }));
}

#[tokio::test]
async fn test_list_pagination_walks_every_item() {
    let backend = InMemoryAppMesh::default();
    backend.create_mesh(CreateMeshRequest::new(MESH)).await.unwrap();
    for i in (0..7).rev() {
        backend
            .create_virtual_node(CreateVirtualNodeRequest::new(
                MESH,
                format!("node-{i}"),
                VirtualNodeSpec::default(),
            ))
            .await
            .unwrap();
    }

    let mut names = Vec::new();
    let mut next_token: Option<String> = None;
    loop {
        let mut request = ListVirtualNodesRequest::new(MESH).with_limit(3);
        if let Some(token) = next_token.take() {
            request = request.with_next_token(token);
        }
        let page = backend.list_virtual_nodes(request).await.unwrap();
        assert!(page.virtual_nodes.len() <= 3);
        names.extend(page.virtual_nodes.into_iter().map(|node| node.virtual_node_name));
        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    let expected: Vec<String> = (0..7).map(|i| format!("node-{i}")).collect();
    assert_eq!(names, expected);

    let err = backend
        .list_virtual_nodes(ListVirtualNodesRequest::new(MESH).with_next_token("%%%"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppMeshError::BadRequest { .. }));
}

#[tokio::test]
async fn test_tagging_operations() {
    let config = ServiceConfig {
        region: "eu-west-1".to_string(),
        account_id: "123456789012".to_string(),
        ..Default::default()
    };
    let backend = InMemoryAppMesh::new(config);
    let mesh = backend
        .create_mesh(CreateMeshRequest::new(MESH).with_tag(TagRef::new("team", "orders")))
        .await
        .unwrap()
        .mesh;
    let arn = mesh.metadata.arn.clone();
    assert_eq!(arn, "arn:aws:appmesh:eu-west-1:123456789012:mesh/shop");

    backend
        .tag_resource(TagResourceRequest::new(
            arn.clone(),
            vec![TagRef::new("env", "prod"), TagRef::new("team", "platform")],
        ))
        .await
        .unwrap();

    let tags = backend
        .list_tags_for_resource(ListTagsForResourceRequest::new(arn.clone()))
        .await
        .unwrap()
        .tags;
    assert_eq!(tags, vec![TagRef::new("env", "prod"), TagRef::new("team", "platform")]);

    backend
        .untag_resource(UntagResourceRequest::new(arn.clone(), ["env", "missing"]))
        .await
        .unwrap();
    let tags = backend
        .list_tags_for_resource(ListTagsForResourceRequest::new(arn.clone()).with_limit(1))
        .await
        .unwrap();
    assert_eq!(tags.tags, vec![TagRef::new("team", "platform")]);
    assert!(tags.next_token.is_none());

    let err = backend
        .tag_resource(TagResourceRequest::new(
            "arn:aws:appmesh:eu-west-1:123456789012:mesh/other",
            vec![TagRef::key_only("env")],
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppMeshError::NotFound { .. }));
}

#[tokio::test]
async fn test_concurrent_creates_are_serialized() {
    let backend = Arc::new(InMemoryAppMesh::default());
    backend.create_mesh(CreateMeshRequest::new(MESH)).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let backend = Arc::clone(&backend);
        handles.push(tokio::spawn(async move {
            backend
                .create_virtual_node(CreateVirtualNodeRequest::new(
                    MESH,
                    format!("node-{:02}", i % 8),
                    VirtualNodeSpec::default(),
                ))
                .await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AppMeshError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(created, 8);
    assert_eq!(conflicts, 8);

    let node = backend
        .describe_virtual_node(DescribeVirtualNodeRequest::new(MESH, "node-03"))
        .await
        .unwrap()
        .virtual_node;
    assert_eq!(node.metadata.version, 1);

    let routes = backend.list_routes(ListRoutesRequest::new(MESH, ROUTER)).await.unwrap_err();
    assert!(matches!(routes, AppMeshError::NotFound { .. }));
}
