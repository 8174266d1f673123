//! # Resolver Module
//!
//! Maps declared API operations to the handlers that implement them.
//!
//! ## Overview
//!
//! Two strategies implement [`Resolve`]:
//!
//! - [`Resolver`] - uses the operation's `operationId`, namespaced by the router controller
//!   override (`x-openapi-router-controller` / `x-swagger-router-controller`) when present
//! - [`ConventionResolver`] - same precedence, but derives an identifier from the path and
//!   method when no `operationId` is declared
//!
//! Both hold a [`FunctionLocator`](crate::registry::FunctionLocator) and hand the computed
//! identifier to it.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use opresolver::registry::HandlerRegistry;
//! use opresolver::resolver::{ConventionResolver, Resolve};
//! use opresolver::spec::OperationDescriptor;
//! use std::sync::Arc;
//!
//! type Handler = dyn Fn() -> &'static str + Send + Sync;
//!
//! let mut registry: HandlerRegistry<Handler> = HandlerRegistry::new();
//! registry.register("api.orders.search", Arc::new(|| "all orders")).unwrap();
//!
//! let resolver = ConventionResolver::new("api", registry);
//! let resolution = resolver
//!     .resolve(&OperationDescriptor::new(Method::GET, "/orders"))
//!     .unwrap();
//!
//! assert_eq!(resolution.operation_id, "api.orders.search");
//! assert_eq!((resolution.handler)(), "all orders");
//! ```
//!
//! ## Registration
//!
//! Resolution is meant to happen while routes are being registered, not per request.
//! [`resolve_all`] resolves every operation and reports all failures together so a
//! misconfigured service refuses to start.

mod base;
mod convention;
mod path;


pub use base::{resolve_all, RegistrationError, RegistrationFailure, Resolution, Resolve, Resolver};
pub use convention::{ConventionResolver, DEFAULT_COLLECTION_ENDPOINT_NAME};
pub use path::PathParts;
