//! # CLI Module
//!
//! Command-line front end for inspecting how an API document resolves.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the handler identifier of every operation:
//!
//! ```bash
//! opresolver routes --spec openapi.yaml --default-namespace api
//! ```
//!
//! ```text
//! GET     /orders       -> api.orders.search
//! POST    /orders       -> api.orders.post
//! GET     /orders/{id}  -> api.orders.get
//! ```
//!
//! Options:
//! - `--spec <FILE>` - API document, YAML or JSON (required)
//! - `--strategy <explicit|convention>` - resolution strategy (default: convention)
//! - `--config <FILE>` - resolver configuration file
//! - `--default-namespace <NS>` - namespace for derived identifiers
//! - `--collection-endpoint <NAME>` - handler name for collection GETs (default: search)
//! - `--format <table|json>` - output format (default: table)
//!
//! ### `check`
//!
//! Resolve every operation against a list of registered handler identifiers and fail
//! if any operation names a missing handler:
//!
//! ```bash
//! opresolver check --spec openapi.yaml --default-namespace api --handlers handlers.txt
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands, OutputFormat, ResolverArgs, Strategy};
