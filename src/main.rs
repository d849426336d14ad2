//! AdventureWorks catalog server.
//!
//! Main entry point that loads configuration, wires the crates together
//! and serves the HTTP API.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use catalog_api::AppState;
use catalog_auth::{MemoryCredentialStore, PasswordHasher};
use catalog_core::config::{AppConfig, DatabaseBackend};
use catalog_core::error::AppError;
use catalog_database::{CatalogRepositories, DatabasePool};

/// AdventureWorks catalog HTTP service.
#[derive(Debug, Parser)]
#[command(name = "catalog-server", version, about)]
struct Cli {
    /// Base configuration file.
    #[arg(long, global = true, default_value = "config/default.toml")]
    config: String,

    /// Environment overlay loaded from `config/{env}.toml`.
    #[arg(long, global = true, default_value = "development")]
    env: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve(ServeArgs),
    /// Apply pending database migrations and exit.
    Migrate,
    /// Print an Argon2 hash for use as `auth.users.password_hash`.
    HashPassword {
        /// Plain-text password to hash.
        password: String,
    },
}

#[derive(Debug, Default, Args)]
struct ServeArgs {
    /// Override `server.host`.
    #[arg(long)]
    host: Option<String>,
    /// Override `server.port`.
    #[arg(long)]
    port: Option<u16>,
    /// Skip running migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(config, &cli.env, args).await,
        Command::Migrate => migrate(&config).await,
        Command::HashPassword { password } => hash_password(&password),
    };

    if let Err(e) = result {
        tracing::error!(kind = %e.kind, error = %e, "Catalog server failed");
        std::process::exit(1);
    }
}

/// Load and validate configuration from file, overlay and environment.
fn load_configuration(cli: &Cli) -> Result<AppConfig, AppError> {
    let config = AppConfig::load_from(&cli.config, &cli.env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn serve(mut config: AppConfig, env: &str, args: ServeArgs) -> Result<(), AppError> {
    tracing::info!("Starting catalog server v{}", env!("CARGO_PKG_VERSION"));

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    for warning in config.startup_warnings() {
        tracing::warn!(env = %env, "{warning}");
    }

    let repositories = CatalogRepositories::from_config(&config.database, !args.no_migrate).await?;

    let hasher = PasswordHasher::new();
    let credentials = MemoryCredentialStore::from_config(&config.auth, &hasher).await?;
    if credentials.is_empty().await {
        tracing::warn!("No users configured; every token request will be rejected");
    }

    let state = AppState::new(config, repositories, Arc::new(credentials));
    catalog_api::serve(state).await
}

async fn migrate(config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        tracing::info!("In-memory backend selected; nothing to migrate");
        return Ok(());
    }

    let pool = DatabasePool::connect(&config.database).await?;
    let result = catalog_database::migration::run_migrations(pool.pool()).await;
    pool.close().await;
    result
}

fn hash_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }
    let hash = PasswordHasher::new().hash_password(password)?;
    println!("{hash}");
    Ok(())
}
