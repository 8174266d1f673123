#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Environment layering for resolver configuration.
//!
//! Everything that touches `OPRES_*` variables lives in one test so parallel test
//! threads never observe each other's environment.

use opresolver::config::{COLLECTION_ENDPOINT_ENV, DEFAULT_NAMESPACE_ENV};
use opresolver::ResolverConfig;
use std::env;
use std::io::Write;

#[test]
fn test_environment_layering() {
    env::remove_var(DEFAULT_NAMESPACE_ENV);
    env::remove_var(COLLECTION_ENDPOINT_ENV);

    // Nothing configured anywhere
    assert!(ResolverConfig::from_env().is_err());
    assert!(ResolverConfig::from_yaml_str("collection_endpoint_name: list\n").is_err());
    assert!(ResolverConfig::from_yaml_str("").is_err());

    // File only
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"resolver:\n  default_namespace: file_ns\n").unwrap();
    let config = ResolverConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config, ResolverConfig::new("file_ns"));

    // Environment only
    env::set_var(DEFAULT_NAMESPACE_ENV, "env_ns");
    let config = ResolverConfig::from_env().unwrap();
    assert_eq!(config.default_namespace, "env_ns");
    assert_eq!(config.collection_endpoint_name, "search");

    // Environment overrides the file
    env::set_var(COLLECTION_ENDPOINT_ENV, "list");
    let config = ResolverConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.default_namespace, "env_ns");
    assert_eq!(config.collection_endpoint_name, "list");

    // Empty values count as unset
    env::set_var(DEFAULT_NAMESPACE_ENV, "");
    env::set_var(COLLECTION_ENDPOINT_ENV, "");
    let config = ResolverConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config, ResolverConfig::new("file_ns"));
    assert!(ResolverConfig::from_env().is_err());

    env::remove_var(DEFAULT_NAMESPACE_ENV);
    env::remove_var(COLLECTION_ENDPOINT_ENV);
}

#[test]
fn test_unreadable_config_file() {
    let err = ResolverConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}

#[test]
fn test_malformed_config_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"resolver: [unclosed\n").unwrap();
    let err = ResolverConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}
