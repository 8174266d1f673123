use crate::config::ResolverConfig;
use crate::registry::HandlerRegistry;
use crate::resolver::{resolve_all, ConventionResolver, Resolve, Resolver};
use crate::spec::{load_operations, OperationDescriptor};
use anyhow::{ensure, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Command-line interface for opresolver
///
/// Shows and checks how the operations of an API document map to handler identifiers.
#[derive(Parser)]
#[command(name = "opresolver")]
#[command(about = "Resolve API operations to handler identifiers", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the handler identifier of every operation
    Routes {
        #[command(flatten)]
        resolver: ResolverArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Resolve every operation against a list of known handlers
    ///
    /// Exits non-zero and lists every failing operation if any identifier names no handler.
    Check {
        #[command(flatten)]
        resolver: ResolverArgs,

        /// File listing registered handler identifiers, one per line (`#` starts a comment)
        #[arg(long)]
        handlers: PathBuf,
    },
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct ResolverArgs {
    /// Path to the API document (YAML or JSON)
    #[arg(short, long)]
    pub spec: PathBuf,

    /// Resolution strategy
    #[arg(long, value_enum, default_value_t = Strategy::Convention)]
    pub strategy: Strategy,

    /// Resolver configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Namespace for convention-derived identifiers
    #[arg(long, env = "OPRES_DEFAULT_NAMESPACE")]
    pub default_namespace: Option<String>,

    /// Handler name for GET on a bare resource path
    #[arg(long, env = "OPRES_COLLECTION_ENDPOINT")]
    pub collection_endpoint: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Only explicit operationIds (optionally namespaced by the router controller)
    Explicit,
    /// Explicit operationIds, falling back to REST conventions
    Convention,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// One row of the `routes` output
#[derive(Debug, Serialize)]
struct RouteEntry {
    method: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

type CheckHandler = ();

impl ResolverArgs {
    /// Resolve configuration: file, then environment, then flags.
    ///
    /// # Errors
    ///
    /// Fails when the convention strategy is selected and no default namespace is
    /// configured anywhere.
    pub fn resolver_config(&self) -> anyhow::Result<ResolverConfig> {
        // An empty flag or variable counts as unset.
        let default_namespace = self.default_namespace.clone().filter(|ns| !ns.is_empty());
        let config = match (&self.config, &default_namespace) {
            (Some(path), _) => ResolverConfig::from_yaml_file(path)?,
            (None, Some(ns)) => ResolverConfig::new(ns.clone()),
            (None, None) => ResolverConfig::from_env()
                .context("pass --default-namespace, --config, or set OPRES_DEFAULT_NAMESPACE")?,
        };
        let config = config.with_overrides(default_namespace, self.collection_endpoint.clone());
        ensure!(!config.default_namespace.is_empty(), "default namespace must not be empty");
        Ok(config)
    }

    fn build_resolver(
        &self,
        registry: HandlerRegistry<CheckHandler>,
    ) -> anyhow::Result<Box<dyn Resolve<Handler = CheckHandler>>> {
        Ok(match self.strategy {
            Strategy::Explicit => Box::new(Resolver::new(registry)),
            Strategy::Convention => Box::new(ConventionResolver::from_config(
                &self.resolver_config()?,
                registry,
            )),
        })
    }
}

/// Parse the process arguments and run the selected command
///
/// # Errors
///
/// Returns any I/O, parse, configuration, or resolution failure.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

/// Run a parsed command, writing results to `out`
///
/// # Errors
///
/// See [`run_cli`].
pub fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Routes { resolver, format } => {
            let operations = load_operations(&resolver.spec)?;
            let strategy = resolver.build_resolver(HandlerRegistry::new())?;
            let entries = route_entries(strategy.as_ref(), &operations);
            write_routes(out, &entries, format)
        }
        Commands::Check { resolver, handlers } => {
            let operations = load_operations(&resolver.spec)?;
            let registry = load_handler_list(&handlers)?;
            let strategy = resolver.build_resolver(registry)?;
            let resolutions = resolve_all(strategy.as_ref(), &operations)?;
            info!(operations = resolutions.len(), "Check passed");
            writeln!(out, "✅ {} operation(s) resolved", resolutions.len())?;
            Ok(())
        }
    }
}

fn route_entries(
    resolver: &dyn Resolve<Handler = CheckHandler>,
    operations: &[OperationDescriptor],
) -> Vec<RouteEntry> {
    operations
        .iter()
        .map(|op| {
            let (operation_id, error) = match resolver.resolve_operation_id(op) {
                Ok(id) => (Some(id), None),
                Err(err) => (None, Some(err.to_string())),
            };
            RouteEntry {
                method: op.method.to_string(),
                path: op.path.clone(),
                operation_id,
                error,
            }
        })
        .collect()
}

fn write_routes(
    out: &mut dyn Write,
    entries: &[RouteEntry],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, entries)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            let width = entries.iter().map(|e| e.path.len()).max().unwrap_or(0);
            for entry in entries {
                let target = match (&entry.operation_id, &entry.error) {
                    (Some(id), _) => id.clone(),
                    (None, Some(err)) => format!("❌ {err}"),
                    (None, None) => String::new(),
                };
                writeln!(
                    out,
                    "{:<7} {:<width$} -> {}",
                    entry.method, entry.path, target
                )?;
            }
        }
    }
    Ok(())
}

/// Read a newline-separated identifier list into a registry.
fn load_handler_list(path: &Path) -> anyhow::Result<HandlerRegistry<CheckHandler>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read handler list {}", path.display()))?;
    let mut registry = HandlerRegistry::new();
    for (line_no, line) in content.lines().enumerate() {
        let id = line.split('#').next().unwrap_or_default().trim();
        if id.is_empty() {
            continue;
        }
        registry
            .register(id, Arc::new(()))
            .with_context(|| format!("{}:{}", path.display(), line_no + 1))?;
    }
    Ok(registry)
}
