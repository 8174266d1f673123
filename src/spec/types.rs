use http::Method;
use serde_json::Value;
use std::collections::HashMap;

/// Metadata key holding the explicit handler identifier.
pub const OPERATION_ID_KEY: &str = "operationId";

/// Router controller override keys, in lookup order.
///
/// OpenAPI 3 documents use `x-openapi-router-controller`; Swagger 2 documents use
/// `x-swagger-router-controller`. Both name the same concept.
pub const ROUTER_CONTROLLER_KEYS: [&str; 2] =
    ["x-openapi-router-controller", "x-swagger-router-controller"];

/// Operation metadata as declared in the API document (`operationId`, vendor extensions, ...).
pub type OperationMetadata = HashMap<String, Value>;

/// One declared endpoint: an HTTP method, a path template and its operation object.
///
/// Descriptors are produced by whatever parses the API document and are never mutated by
/// the resolvers.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    /// HTTP method of the operation
    pub method: Method,
    /// Path template, e.g. `/orders/{id}`
    pub path: String,
    /// Operation object entries
    pub metadata: OperationMetadata,
}

impl OperationDescriptor {
    /// Create a descriptor with empty metadata
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            metadata: OperationMetadata::new(),
        }
    }

    /// Create a descriptor from a method token such as `get` or `DELETE`.
    ///
    /// Returns `None` when the token is not a valid HTTP method.
    #[must_use]
    pub fn from_method_token(token: &str, path: impl Into<String>) -> Option<Self> {
        parse_method(token).map(|method| Self::new(method, path))
    }

    /// Set the explicit `operationId`
    #[must_use]
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.metadata
            .insert(OPERATION_ID_KEY.to_string(), Value::String(operation_id.into()));
        self
    }

    /// Set the router controller override (OpenAPI 3 key)
    #[must_use]
    pub fn with_router_controller(mut self, controller: impl Into<String>) -> Self {
        self.metadata.insert(
            ROUTER_CONTROLLER_KEYS[0].to_string(),
            Value::String(controller.into()),
        );
        self
    }

    /// Insert an arbitrary metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The explicit handler identifier, if one is declared and non-empty.
    #[must_use]
    pub fn operation_id(&self) -> Option<&str> {
        non_empty_str(self.metadata.get(OPERATION_ID_KEY))
    }

    /// The router controller override, if any dialect declares a non-empty one.
    #[must_use]
    pub fn router_controller(&self) -> Option<&str> {
        ROUTER_CONTROLLER_KEYS
            .iter()
            .find_map(|key| non_empty_str(self.metadata.get(*key)))
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Parse an HTTP method token case-insensitively.
#[must_use]
pub fn parse_method(token: &str) -> Option<Method> {
    if token.is_empty() {
        return None;
    }
    Method::from_bytes(token.to_ascii_uppercase().as_bytes()).ok()
}
