//! # Registry Module
//!
//! Turns a dotted handler identifier such as `api.orders.search` into the callable it
//! names.
//!
//! ## Overview
//!
//! Resolvers never reach into global state to find handlers. Instead they hold a
//! [`FunctionLocator`], and the host decides where handlers come from:
//!
//! - [`HandlerRegistry`] - the default, an explicit namespace tree populated once at startup
//! - any closure `Fn(&str) -> Result<Arc<H>, LookupError>` - e.g. a DI container lookup
//!
//! ## Population
//!
//! ```rust
//! use opresolver::registry::{FunctionLocator, HandlerRegistry};
//! use std::sync::Arc;
//!
//! type Handler = dyn Fn(u32) -> u32 + Send + Sync;
//!
//! let mut registry: HandlerRegistry<Handler> = HandlerRegistry::new();
//! registry.register("api.orders.search", Arc::new(|page: u32| page + 1)).unwrap();
//!
//! let search = registry.locate("api.orders.search").unwrap();
//! assert_eq!(search(1), 2);
//! ```
//!
//! ## Lookup
//!
//! `locate` splits the identifier on its last `.`, imports the namespace by walking
//! progressively longer dotted prefixes (`api`, then `api.orders`) and finally looks up the
//! member. The first missing prefix yields [`LookupError::ImportFailed`]; a missing member
//! yields [`LookupError::MemberNotFound`].

mod error;

pub use error::LookupError;

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Strategy for finding the callable named by a dotted identifier.
pub trait FunctionLocator {
    /// The callable type handed back to resolvers
    type Handler: ?Sized;

    /// Locate the callable named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] when the identifier names nothing.
    fn locate(&self, identifier: &str) -> Result<Arc<Self::Handler>, LookupError>;
}

impl<F, H> FunctionLocator for F
where
    F: Fn(&str) -> Result<Arc<H>, LookupError>,
    H: ?Sized,
{
    type Handler = H;

    fn locate(&self, identifier: &str) -> Result<Arc<H>, LookupError> {
        self(identifier)
    }
}

/// Members of one namespace, keyed by member name.
struct Namespace<H: ?Sized> {
    members: HashMap<String, Arc<H>>,
}

impl<H: ?Sized> Default for Namespace<H> {
    fn default() -> Self {
        Self {
            members: HashMap::new(),
        }
    }
}

/// Default [`FunctionLocator`]: an explicit tree of dotted namespaces.
///
/// Registering `a.b.c` creates the namespaces `a` and `a.b` and places member `c`
/// in `a.b`. The registry is meant to be filled once during startup and then shared
/// read-only; it is `Send + Sync` whenever `H` is.
pub struct HandlerRegistry<H: ?Sized> {
    namespaces: HashMap<String, Namespace<H>>,
}

impl<H: ?Sized> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> std::fmt::Debug for HandlerRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.namespaces.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("namespaces", &names)
            .field("handlers", &self.len())
            .finish()
    }
}

impl<H: ?Sized> HandlerRegistry<H> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespaces: HashMap::new(),
        }
    }

    /// Register `handler` under a fully-qualified dotted identifier.
    ///
    /// Missing parent namespaces are created. Registering an identifier twice replaces
    /// the earlier handler.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidIdentifier`] if the identifier has no namespace part
    /// or contains an empty segment.
    pub fn register(&mut self, identifier: &str, handler: Arc<H>) -> Result<(), LookupError> {
        let (namespace, member) = split_identifier(identifier)?;

        for (idx, _) in namespace.match_indices('.') {
            self.namespaces
                .entry(namespace[..idx].to_string())
                .or_default();
        }
        let members = &mut self
            .namespaces
            .entry(namespace.to_string())
            .or_default()
            .members;

        if members.insert(member.to_string(), handler).is_some() {
            warn!(
                identifier = %identifier,
                "Replaced existing handler"
            );
        } else {
            info!(
                identifier = %identifier,
                namespace = %namespace,
                "Handler registered"
            );
        }
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn with(mut self, identifier: &str, handler: Arc<H>) -> Result<Self, LookupError> {
        self.register(identifier, handler)?;
        Ok(self)
    }

    /// Whether a namespace (or any of its descendants) has been registered
    #[must_use]
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    /// Whether `identifier` names a registered handler
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.locate(identifier).is_ok()
    }

    /// Number of registered handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.values().map(|ns| ns.members.len()).sum()
    }

    /// Whether no handler has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered identifiers, sorted
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .namespaces
            .iter()
            .flat_map(|(ns, namespace)| {
                namespace
                    .members
                    .keys()
                    .map(move |member| format!("{ns}.{member}"))
            })
            .collect();
        ids.sort_unstable();
        ids
    }

    fn import(&self, identifier: &str, namespace: &str) -> Result<&Namespace<H>, LookupError> {
        let prefixes = namespace
            .match_indices('.')
            .map(|(idx, _)| &namespace[..idx])
            .chain(std::iter::once(namespace));
        let mut imported = None;
        for prefix in prefixes {
            match self.namespaces.get(prefix) {
                Some(ns) => imported = Some(ns),
                None => {
                    return Err(LookupError::ImportFailed {
                        identifier: identifier.to_string(),
                        namespace: prefix.to_string(),
                    })
                }
            }
        }
        imported.ok_or_else(|| LookupError::ImportFailed {
            identifier: identifier.to_string(),
            namespace: namespace.to_string(),
        })
    }
}

impl<H: ?Sized> FunctionLocator for HandlerRegistry<H> {
    type Handler = H;

    fn locate(&self, identifier: &str) -> Result<Arc<H>, LookupError> {
        let (namespace, member) = split_identifier(identifier)?;
        let ns = self.import(identifier, namespace)?;
        let handler = ns
            .members
            .get(member)
            .ok_or_else(|| LookupError::MemberNotFound {
                identifier: identifier.to_string(),
                namespace: namespace.to_string(),
                member: member.to_string(),
            })?;
        debug!(identifier = %identifier, "Located handler");
        Ok(Arc::clone(handler))
    }
}

/// Split `a.b.c` into (`a.b`, `c`), rejecting empty segments.
fn split_identifier(identifier: &str) -> Result<(&str, &str), LookupError> {
    let invalid = || LookupError::InvalidIdentifier {
        identifier: identifier.to_string(),
    };
    let (namespace, member) = identifier.rsplit_once('.').ok_or_else(invalid)?;
    if member.is_empty() || namespace.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    Ok((namespace, member))
}
