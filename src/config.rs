//! # Configuration Module
//!
//! Settings for [`ConventionResolver`](crate::resolver::ConventionResolver), loaded from a
//! YAML file, from environment variables, or both.
//!
//! ## Environment Variables
//!
//! ### `OPRES_DEFAULT_NAMESPACE`
//!
//! Namespace prefixed to every convention-derived identifier, e.g. `api` turns
//! `GET /orders` into `api.orders.search`.
//!
//! ### `OPRES_COLLECTION_ENDPOINT`
//!
//! Handler name for `GET` on a bare resource path. Default: `search`.
//!
//! ## File Format
//!
//! ```yaml
//! resolver:
//!   default_namespace: api
//!   collection_endpoint_name: list
//! ```
//!
//! The `resolver:` wrapper is optional; the two keys may also sit at the top level.
//!
//! ## Precedence
//!
//! Command-line flags override environment variables, which override the file.

use crate::resolver::DEFAULT_COLLECTION_ENDPOINT_NAME;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_NAMESPACE_ENV: &str = "OPRES_DEFAULT_NAMESPACE";
pub const COLLECTION_ENDPOINT_ENV: &str = "OPRES_COLLECTION_ENDPOINT";

/// Convention resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Fallback namespace for derived identifiers
    pub default_namespace: String,
    /// Handler name for collection `GET`s (default: `search`)
    #[serde(default = "default_collection_endpoint_name")]
    pub collection_endpoint_name: String,
}

fn default_collection_endpoint_name() -> String {
    DEFAULT_COLLECTION_ENDPOINT_NAME.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Wrapped { resolver: PartialConfig },
    Flat(PartialConfig),
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    default_namespace: Option<String>,
    collection_endpoint_name: Option<String>,
}

impl ResolverConfig {
    /// Configuration with the default collection endpoint name
    #[must_use]
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            collection_endpoint_name: default_collection_endpoint_name(),
        }
    }

    /// Load from environment variables only.
    ///
    /// # Errors
    ///
    /// Fails when `OPRES_DEFAULT_NAMESPACE` is unset or empty.
    pub fn from_env() -> anyhow::Result<Self> {
        let default_namespace = non_empty_env(DEFAULT_NAMESPACE_ENV)
            .with_context(|| format!("{DEFAULT_NAMESPACE_ENV} is not set"))?;
        let mut config = Self::new(default_namespace);
        if let Some(name) = non_empty_env(COLLECTION_ENDPOINT_ENV) {
            config.collection_endpoint_name = name;
        }
        Ok(config)
    }

    /// Load from a YAML file, with environment variables layered on top.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or when no default namespace is
    /// configured by either source.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse YAML text, with environment variables layered on top.
    ///
    /// # Errors
    ///
    /// See [`from_yaml_file`](Self::from_yaml_file).
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let partial = match serde_yaml::from_str::<Option<ConfigFile>>(content)? {
            Some(ConfigFile::Wrapped { resolver }) => resolver,
            Some(ConfigFile::Flat(flat)) => flat,
            None => PartialConfig::default(),
        };
        let default_namespace = non_empty_env(DEFAULT_NAMESPACE_ENV)
            .or(partial.default_namespace.filter(|ns| !ns.is_empty()));
        let Some(default_namespace) = default_namespace else {
            bail!("default_namespace is not set in the file or {DEFAULT_NAMESPACE_ENV}");
        };
        let collection_endpoint_name = non_empty_env(COLLECTION_ENDPOINT_ENV)
            .or(partial.collection_endpoint_name.filter(|name| !name.is_empty()))
            .unwrap_or_else(default_collection_endpoint_name);
        Ok(Self {
            default_namespace,
            collection_endpoint_name,
        })
    }

    /// Apply command-line overrides; empty values leave the setting unchanged
    #[must_use]
    pub fn with_overrides(
        mut self,
        default_namespace: Option<String>,
        collection_endpoint_name: Option<String>,
    ) -> Self {
        if let Some(ns) = default_namespace.filter(|ns| !ns.is_empty()) {
            self.default_namespace = ns;
        }
        if let Some(name) = collection_endpoint_name.filter(|name| !name.is_empty()) {
            self.collection_endpoint_name = name;
        }
        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
