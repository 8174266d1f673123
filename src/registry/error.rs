use http::Method;
use thiserror::Error;

/// Failure to turn an operation into a callable handler.
///
/// Every variant names what was being looked up so the host can report the
/// misconfigured operation at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The operation declares no `operationId` and the resolver has no convention to fall back on
    #[error("operation {method} {path} has no operationId")]
    MissingOperationId {
        /// HTTP method of the operation
        method: Method,
        /// Path template of the operation
        path: String,
    },
    /// The identifier is empty, has no namespace, or contains an empty segment
    #[error("invalid handler identifier '{identifier}': expected dotted `namespace.member`")]
    InvalidIdentifier {
        /// The identifier as given
        identifier: String,
    },
    /// A namespace on the identifier's path was never registered
    #[error("cannot resolve '{identifier}': namespace '{namespace}' could not be imported")]
    ImportFailed {
        /// The identifier as given
        identifier: String,
        /// The first dotted prefix that is unknown
        namespace: String,
    },
    /// The namespace exists but has no such member
    #[error("cannot resolve '{identifier}': namespace '{namespace}' has no member '{member}'")]
    MemberNotFound {
        /// The identifier as given
        identifier: String,
        /// The namespace that was searched
        namespace: String,
        /// The missing member name
        member: String,
    },
    /// A host-provided locator rejected the identifier
    #[error("cannot resolve '{identifier}': {message}")]
    Locator {
        /// The identifier as given
        identifier: String,
        /// Locator-specific description
        message: String,
    },
}

impl LookupError {
    /// The handler identifier that failed, if the failure got as far as having one
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            LookupError::MissingOperationId { .. } => None,
            LookupError::InvalidIdentifier { identifier }
            | LookupError::ImportFailed { identifier, .. }
            | LookupError::MemberNotFound { identifier, .. }
            | LookupError::Locator { identifier, .. } => Some(identifier),
        }
    }

    /// Short machine-readable kind, used in structured logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::MissingOperationId { .. } => "MissingOperationId",
            LookupError::InvalidIdentifier { .. } => "InvalidIdentifier",
            LookupError::ImportFailed { .. } => "ImportFailed",
            LookupError::MemberNotFound { .. } => "MemberNotFound",
            LookupError::Locator { .. } => "Locator",
        }
    }
}
