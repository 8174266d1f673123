//! # opresolver
//!
//! **opresolver** maps the operations declared in an OpenAPI 3 or Swagger 2 document to the
//! handlers that implement them.
//!
//! ## Overview
//!
//! Every operation (`GET /orders/{id}`, `POST /orders`, ...) needs a handler. This crate
//! computes a dotted handler identifier for each operation and looks it up in a handler
//! registry. It does not serve HTTP, parse request bodies, or invoke handlers; it produces the
//! binding a router registers at startup.
//!
//! ## Architecture
//!
//! - **[`spec`]** - operation descriptors and a thin loader for API documents
//! - **[`registry`]** - the [`FunctionLocator`] trait and the default [`HandlerRegistry`]
//! - **[`resolver`]** - [`Resolver`] (explicit ids) and [`ConventionResolver`] (REST conventions)
//! - **[`config`]** - resolver settings from YAML and environment variables
//! - **[`logging`]** - `tracing-subscriber` setup used by the CLI
//! - **[`cli`]** - the `opresolver` command-line tool
//!
//! ### Resolution Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host
//!     participant Resolver as ConventionResolver
//!     participant Registry as HandlerRegistry
//!
//!     Host->>Registry: register("api.orders.search", handler)
//!     Host->>Resolver: resolve(GET /orders)
//!     alt operationId declared
//!         Resolver->>Resolver: [controller.]operationId
//!     else no operationId
//!         Resolver->>Resolver: namespace + "." + action
//!     end
//!     Resolver->>Registry: locate("api.orders.search")
//!     alt not registered
//!         Registry-->>Host: LookupError
//!     end
//!     Registry-->>Resolver: Arc<handler>
//!     Resolver-->>Host: Resolution
//! ```
//!
//! ## Precedence
//!
//! 1. `operationId`, prefixed by `x-openapi-router-controller` /
//!    `x-swagger-router-controller` when present
//! 2. (convention resolver only) the router controller, or `default_namespace.<resource>`,
//!    followed by `search` for a collection `GET` or the lowercased method otherwise
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use opresolver::{ConventionResolver, HandlerRegistry, OperationDescriptor, Resolve};
//! use std::sync::Arc;
//!
//! type Handler = dyn Fn(&str) -> String + Send + Sync;
//!
//! let mut registry: HandlerRegistry<Handler> = HandlerRegistry::new();
//! registry
//!     .register("api.orders.get", Arc::new(|id: &str| format!("order {id}")))
//!     .unwrap();
//!
//! let resolver = ConventionResolver::new("api", registry);
//! let op = OperationDescriptor::new(Method::GET, "/orders/{id}");
//! let resolution = resolver.resolve(&op).unwrap();
//!
//! assert_eq!(resolution.operation_id, "api.orders.get");
//! assert_eq!((resolution.handler)("7"), "order 7");
//! ```
//!
//! ## Fail Fast
//!
//! Resolve all operations while registering routes, before serving traffic, so a missing
//! handler stops startup instead of failing the first request:
//!
//! ```rust,ignore
//! let operations = opresolver::spec::load_operations("openapi.yaml")?;
//! let resolutions = opresolver::resolve_all(&resolver, &operations)?;
//! for r in resolutions {
//!     router.bind(&r.operation_id, r.handler);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod logging;
pub mod registry;
pub mod resolver;
pub mod spec;

pub use config::ResolverConfig;
pub use registry::{FunctionLocator, HandlerRegistry, LookupError};
pub use resolver::{
    resolve_all, ConventionResolver, RegistrationError, Resolution, Resolve, Resolver,
};
pub use spec::{load_operations, OperationDescriptor};
