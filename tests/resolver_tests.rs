#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end resolution: API document on disk -> descriptors -> registry lookups.

use http::Method;
use opresolver::registry::HandlerRegistry;
use opresolver::{
    load_operations, resolve_all, ConventionResolver, LookupError, OperationDescriptor, Resolve,
    Resolver,
};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

type Handler = dyn Fn() -> &'static str + Send + Sync;

const OPENAPI_YAML: &str = r#"openapi: 3.1.0
info:
  title: Shop API
  version: "1.0.0"
paths:
  /:
    get:
      summary: API root
  /orders:
    get:
      summary: List orders
    post:
      summary: Create order
  /orders/{id}:
    parameters:
      - name: id
        in: path
        required: true
        schema: { type: string }
    get:
      summary: Fetch order
    delete:
      operationId: cancel
      x-openapi-router-controller: shop.cancellations
  /order-items:
    get:
      summary: List order items
  /reports:
    get:
      operationId: reports.generate
"#;

const SWAGGER_JSON: &str = r#"{
  "swagger": "2.0",
  "info": { "title": "Legacy", "version": "1" },
  "paths": {
    "/pets": {
      "get": { "operationId": "list", "x-swagger-router-controller": "legacy.pets" },
      "post": { "x-swagger-router-controller": "legacy.pets" }
    }
  }
}"#;

fn write_spec(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn registry(ids: &[&'static str]) -> HandlerRegistry<Handler> {
    let mut registry: HandlerRegistry<Handler> = HandlerRegistry::new();
    for &id in ids {
        registry.register(id, Arc::new(move || id)).unwrap();
    }
    registry
}

fn ids_by_route<R: Resolve>(resolver: &R, ops: &[OperationDescriptor]) -> HashMap<String, String> {
    ops.iter()
        .map(|op| {
            (
                format!("{} {}", op.method, op.path),
                resolver.resolve_operation_id(op).unwrap(),
            )
        })
        .collect()
}

#[test]
fn test_openapi_document_convention_ids() {
    let spec = write_spec(".yaml", OPENAPI_YAML);
    let ops = load_operations(spec.path()).unwrap();
    assert_eq!(ops.len(), 7);

    let resolver = ConventionResolver::new("api", registry(&[]));
    let ids = ids_by_route(&resolver, &ops);

    assert_eq!(ids["GET /"], "api.get");
    assert_eq!(ids["GET /orders"], "api.orders.search");
    assert_eq!(ids["POST /orders"], "api.orders.post");
    assert_eq!(ids["GET /orders/{id}"], "api.orders.get");
    assert_eq!(ids["DELETE /orders/{id}"], "shop.cancellations.cancel");
    assert_eq!(ids["GET /order-items"], "api.order_items.search");
    assert_eq!(ids["GET /reports"], "reports.generate");
}

#[test]
fn test_swagger_document_router_controller() {
    let spec = write_spec(".json", SWAGGER_JSON);
    let ops = load_operations(spec.path()).unwrap();

    let resolver = ConventionResolver::new("api", registry(&[]));
    let ids = ids_by_route(&resolver, &ops);
    assert_eq!(ids["GET /pets"], "legacy.pets.list");
    assert_eq!(ids["POST /pets"], "legacy.pets.post");
}

#[test]
fn test_full_registration_succeeds_with_all_handlers() {
    let spec = write_spec(".yml", OPENAPI_YAML);
    let ops = load_operations(spec.path()).unwrap();
    let resolver = ConventionResolver::new(
        "api",
        registry(&[
            "api.get",
            "api.orders.search",
            "api.orders.post",
            "api.orders.get",
            "shop.cancellations.cancel",
            "api.order_items.search",
            "reports.generate",
        ]),
    );

    let resolutions = resolve_all(&resolver, &ops).unwrap();
    assert_eq!(resolutions.len(), ops.len());
    for resolution in &resolutions {
        // Each test handler returns its own identifier.
        assert_eq!((resolution.handler)(), resolution.operation_id);
    }
}

#[test]
fn test_registration_reports_missing_handlers() {
    let spec = write_spec(".yaml", OPENAPI_YAML);
    let ops = load_operations(spec.path()).unwrap();
    let resolver = ConventionResolver::new("api", registry(&["api.orders.search"]));

    let err = resolve_all(&resolver, &ops).unwrap_err();
    assert_eq!(err.failures.len(), ops.len() - 1);
    assert!(err
        .failures
        .iter()
        .any(|f| f.location == "DELETE /orders/{id}" && f.error.kind() == "ImportFailed"));
}

#[test]
fn test_explicit_resolver_rejects_operations_without_id() {
    let spec = write_spec(".yaml", OPENAPI_YAML);
    let ops = load_operations(spec.path()).unwrap();
    let resolver = Resolver::new(registry(&["shop.cancellations.cancel", "reports.generate"]));

    let err = resolve_all(&resolver, &ops).unwrap_err();
    assert_eq!(err.failures.len(), 5);
    assert!(err
        .failures
        .iter()
        .all(|f| matches!(f.error, LookupError::MissingOperationId { .. })));
}

#[test]
fn test_configured_collection_endpoint() {
    let config = opresolver::ResolverConfig::from_yaml_str(
        "resolver:\n  default_namespace: svc\n  collection_endpoint_name: index\n",
    )
    .unwrap();
    let resolver = ConventionResolver::from_config(&config, registry(&["svc.orders.index"]));

    let resolution = resolver
        .resolve(&OperationDescriptor::new(Method::GET, "/orders"))
        .unwrap();
    assert_eq!(resolution.operation_id, "svc.orders.index");
    assert_eq!(resolver.default_namespace(), "svc");
    assert_eq!(resolver.collection_endpoint_name(), "index");
}

#[test]
fn test_resolver_is_shareable_across_threads() {
    let resolver = Arc::new(ConventionResolver::new(
        "api",
        registry(&["api.orders.search", "api.orders.get"]),
    ));

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || {
                let path = if i % 2 == 0 { "/orders" } else { "/orders/{id}" };
                let op = OperationDescriptor::new(Method::GET, path);
                resolver.resolve(&op).unwrap().operation_id
            })
        })
        .collect();

    let ids: Vec<String> = workers.into_iter().map(|w| w.join().unwrap()).collect();
    assert_eq!(
        ids,
        vec!["api.orders.search", "api.orders.get", "api.orders.search", "api.orders.get"]
    );
}

#[test]
fn test_missing_document_is_an_error() {
    let err = load_operations("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("failed to read API document"));
}
