//! Binary entry point for promptdex.
//!
//! This binary provides the CLI for the promptdex catalog service.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow printing in the main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use promptdex::config::PromptdexConfig;
use promptdex::observability::{self, InitOptions};
use promptdex::services::{CatalogService, SeedService};
use promptdex::storage::{PromptStore, StoreFactory};
use promptdex::models::PromptFilter;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

/// Promptdex - a prompt catalog service.
#[derive(Parser)]
#[command(name = "promptdex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides config and `PORT`).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Seed the store with sample data if it is empty.
    Seed,

    /// Show store status.
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; explicit env vars still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let expose_metrics = matches!(cli.command, Commands::Serve { .. });
    let _observability = match observability::init_from_config(
        &config.observability,
        InitOptions {
            verbose: cli.verbose,
            metrics_expose: expose_metrics,
        },
    ) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_command(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration: explicit flag, `PROMPTDEX_CONFIG_PATH`, default
/// location, then environment overrides on top.
fn load_config(path: Option<&str>) -> Result<PromptdexConfig, Box<dyn std::error::Error>> {
    let config = if let Some(path) = path {
        PromptdexConfig::load_from_file(std::path::Path::new(path))?
    } else if let Ok(path) = std::env::var("PROMPTDEX_CONFIG_PATH") {
        PromptdexConfig::load_from_file(std::path::Path::new(&path))?
    } else {
        PromptdexConfig::load_default()
    };

    Ok(config.with_env_overrides())
}

async fn run_command(cli: Cli, config: PromptdexConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Serve { port } => cmd_serve(config, port).await,
        Commands::Seed => cmd_seed(&config),
        Commands::Status => cmd_status(&config),
    }
}

fn create_store(config: &PromptdexConfig) -> promptdex::Result<Arc<dyn PromptStore>> {
    StoreFactory::create_with_backend(config.backend, config.database_path.clone())
}

async fn cmd_serve(
    mut config: PromptdexConfig,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port {
        config.http_port = port;
    }

    let store = create_store(&config)?;

    if config.seed_on_start {
        let inserted = SeedService::new(Arc::clone(&store)).seed_if_empty()?;
        if inserted > 0 {
            println!("Seeded {inserted} sample prompts");
        }
    }

    let catalog = Arc::new(
        CatalogService::new(store)
            .with_store_timeout(Duration::from_secs(config.store_timeout_secs))
            .with_increment_timeout(Duration::from_secs(config.increment_timeout_secs)),
    );

    promptdex::http::serve(&config, catalog).await?;
    Ok(())
}

fn cmd_seed(config: &PromptdexConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_store(config)?;
    let inserted = SeedService::new(store).seed_if_empty()?;

    if inserted > 0 {
        println!("Seeded {inserted} sample prompts");
    } else {
        println!("Store already has data, nothing to seed");
    }
    Ok(())
}

fn cmd_status(config: &PromptdexConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_store(config)?;

    println!("Backend:    {}", config.backend.name());
    match &config.database_path {
        Some(path) => println!("Database:   {}", path.display()),
        None => println!("Database:   (platform default)"),
    }

    let total = store.count(&PromptFilter::All)?;
    println!("Prompts:    {total}");

    let categories = store.distinct_categories()?;
    if categories.is_empty() {
        println!("Categories: (none)");
    } else {
        println!("Categories: {}", categories.join(", "));
    }

    Ok(())
}
