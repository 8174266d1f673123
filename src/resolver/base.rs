use crate::registry::{FunctionLocator, LookupError};
use crate::spec::OperationDescriptor;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Result of resolving one operation: the identifier and the callable it names.
///
/// The handler is shared with the locator that owns it; `Arc::ptr_eq` against the
/// registered value holds.
pub struct Resolution<H: ?Sized> {
    /// Dotted handler identifier, e.g. `api.orders.search`
    pub operation_id: String,
    /// The located callable
    pub handler: Arc<H>,
}

impl<H: ?Sized> Clone for Resolution<H> {
    fn clone(&self) -> Self {
        Self {
            operation_id: self.operation_id.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: ?Sized> fmt::Debug for Resolution<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("operation_id", &self.operation_id)
            .finish_non_exhaustive()
    }
}

/// A strategy that maps operations to handlers.
///
/// Implementors decide how the identifier is computed; [`resolve`](Resolve::resolve)
/// combines that with the locator lookup.
pub trait Resolve {
    /// The callable type produced by the underlying locator
    type Handler: ?Sized;

    /// Compute the dotted handler identifier for an operation.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::MissingOperationId`] when no identifier can be derived.
    fn resolve_operation_id(&self, operation: &OperationDescriptor) -> Result<String, LookupError>;

    /// Look up the callable named by `operation_id`.
    ///
    /// # Errors
    ///
    /// Propagates the locator's [`LookupError`] unchanged.
    fn resolve_function(&self, operation_id: &str) -> Result<Arc<Self::Handler>, LookupError>;

    /// Resolve an operation to its identifier and handler.
    ///
    /// # Errors
    ///
    /// Fails with the first [`LookupError`] from either step; there is no partial result.
    fn resolve(
        &self,
        operation: &OperationDescriptor,
    ) -> Result<Resolution<Self::Handler>, LookupError> {
        let operation_id = self.resolve_operation_id(operation)?;
        let handler = self.resolve_function(&operation_id)?;
        debug!(
            method = %operation.method,
            path = %operation.path,
            operation_id = %operation_id,
            "Operation resolved"
        );
        Ok(Resolution {
            operation_id,
            handler,
        })
    }
}

/// Resolver that only honours explicit identifiers.
///
/// The identifier is `operationId`, prefixed with the router controller override
/// when one is declared.
#[derive(Debug, Clone)]
pub struct Resolver<L> {
    locator: L,
}

impl<L: FunctionLocator> Resolver<L> {
    /// Create a resolver backed by `locator`
    #[must_use]
    pub fn new(locator: L) -> Self {
        Self { locator }
    }

    /// The locator handlers are looked up in
    #[must_use]
    pub fn locator(&self) -> &L {
        &self.locator
    }
}

impl<L: FunctionLocator> Resolve for Resolver<L> {
    type Handler = L::Handler;

    fn resolve_operation_id(&self, operation: &OperationDescriptor) -> Result<String, LookupError> {
        explicit_operation_id(operation).ok_or_else(|| LookupError::MissingOperationId {
            method: operation.method.clone(),
            path: operation.path.clone(),
        })
    }

    fn resolve_function(&self, operation_id: &str) -> Result<Arc<L::Handler>, LookupError> {
        self.locator.locate(operation_id)
    }
}

/// `controller.operationId`, or just `operationId`; `None` without an `operationId`.
fn explicit_operation_id(operation: &OperationDescriptor) -> Option<String> {
    let operation_id = operation.operation_id()?;
    Some(match operation.router_controller() {
        Some(controller) => format!("{controller}.{operation_id}"),
        None => operation_id.to_string(),
    })
}

/// One operation that failed to resolve during registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFailure {
    /// `METHOD path` of the failing operation
    pub location: String,
    /// Why it failed
    pub error: LookupError,
}

impl fmt::Display for RegistrationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.error.kind(), self.location, self.error)
    }
}

/// Every operation that failed during [`resolve_all`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} operation(s) failed to resolve:\n{}", .failures.len(), render_failures(.failures))]
pub struct RegistrationError {
    /// Failures in declaration order
    pub failures: Vec<RegistrationFailure>,
}

fn render_failures(failures: &[RegistrationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve every operation up front, before any traffic is served.
///
/// All operations are attempted so the host can report every misconfiguration at
/// once. Any failure fails the whole registration.
///
/// # Errors
///
/// Returns a [`RegistrationError`] listing each operation that did not resolve.
pub fn resolve_all<'a, R, I>(
    resolver: &R,
    operations: I,
) -> Result<Vec<Resolution<R::Handler>>, RegistrationError>
where
    R: Resolve + ?Sized,
    I: IntoIterator<Item = &'a OperationDescriptor>,
{
    let mut resolutions = Vec::new();
    let mut failures = Vec::new();

    for operation in operations {
        match resolver.resolve(operation) {
            Ok(resolution) => resolutions.push(resolution),
            Err(err) => {
                let location = format!("{} {}", operation.method, operation.path);
                error!(
                    location = %location,
                    kind = err.kind(),
                    error = %err,
                    "Operation failed to resolve"
                );
                failures.push(RegistrationFailure {
                    location,
                    error: err,
                });
            }
        }
    }

    if !failures.is_empty() {
        return Err(RegistrationError { failures });
    }
    info!(operations = resolutions.len(), "All operations resolved");
    Ok(resolutions)
}
