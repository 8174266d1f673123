use super::base::{Resolve, Resolver};
use super::path::PathParts;
use crate::config::ResolverConfig;
use crate::registry::{FunctionLocator, LookupError};
use crate::spec::OperationDescriptor;
use std::sync::Arc;
use tracing::debug;

/// Handler name used for `GET` on a bare resource path unless configured otherwise.
pub const DEFAULT_COLLECTION_ENDPOINT_NAME: &str = "search";

/// Resolver that falls back to REST conventions when no `operationId` is declared.
///
/// | Operation             | Identifier                  |
/// |-----------------------|-----------------------------|
/// | `GET /orders`         | `api.orders.search`         |
/// | `GET /orders/{id}`    | `api.orders.get`            |
/// | `POST /orders`        | `api.orders.post`           |
/// | `GET /order-items`    | `api.order_items.search`    |
/// | `GET /`               | `api.get`                   |
///
/// (with `default_namespace = "api"`). Only the first path segment selects the
/// namespace, so `GET /orders/{id}/items` is `api.orders.get`. A router controller
/// override replaces the derived namespace; an explicit `operationId` bypasses the
/// conventions entirely.
#[derive(Debug, Clone)]
pub struct ConventionResolver<L> {
    base: Resolver<L>,
    default_namespace: String,
    collection_endpoint_name: String,
}

impl<L: FunctionLocator> ConventionResolver<L> {
    /// Create a resolver with the default collection endpoint name (`search`)
    #[must_use]
    pub fn new(default_namespace: impl Into<String>, locator: L) -> Self {
        Self {
            base: Resolver::new(locator),
            default_namespace: default_namespace.into(),
            collection_endpoint_name: DEFAULT_COLLECTION_ENDPOINT_NAME.to_string(),
        }
    }

    /// Build from loaded configuration
    #[must_use]
    pub fn from_config(config: &ResolverConfig, locator: L) -> Self {
        Self::new(config.default_namespace.clone(), locator)
            .with_collection_endpoint_name(config.collection_endpoint_name.clone())
    }

    /// Override the handler name used for collection `GET`s
    #[must_use]
    pub fn with_collection_endpoint_name(mut self, name: impl Into<String>) -> Self {
        self.collection_endpoint_name = name.into();
        self
    }

    #[must_use]
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    #[must_use]
    pub fn collection_endpoint_name(&self) -> &str {
        &self.collection_endpoint_name
    }

    /// The locator handlers are looked up in
    #[must_use]
    pub fn locator(&self) -> &L {
        self.base.locator()
    }

    /// Derive the identifier from path and method alone (plus any controller override).
    #[must_use]
    pub fn conventional_operation_id(&self, operation: &OperationDescriptor) -> String {
        let parts = PathParts::parse(&operation.path);

        let namespace = match operation.router_controller() {
            Some(controller) => controller.to_string(),
            None if !parts.resource.is_empty() => {
                format!("{}.{}", self.default_namespace, parts.namespace_segment())
            }
            None => self.default_namespace.clone(),
        };

        let is_get = operation.method.as_str().eq_ignore_ascii_case("GET");
        let action = if is_get && parts.is_collection() {
            self.collection_endpoint_name.clone()
        } else {
            operation.method.as_str().to_ascii_lowercase()
        };

        let operation_id = format!("{namespace}.{action}");
        debug!(
            method = %operation.method,
            path = %operation.path,
            resource = parts.resource,
            operation_id = %operation_id,
            "Derived operation id from REST conventions"
        );
        operation_id
    }
}

impl<L: FunctionLocator> Resolve for ConventionResolver<L> {
    type Handler = L::Handler;

    fn resolve_operation_id(&self, operation: &OperationDescriptor) -> Result<String, LookupError> {
        if operation.operation_id().is_some() {
            return self.base.resolve_operation_id(operation);
        }
        Ok(self.conventional_operation_id(operation))
    }

    fn resolve_function(&self, operation_id: &str) -> Result<Arc<L::Handler>, LookupError> {
        self.base.resolve_function(operation_id)
    }
}
