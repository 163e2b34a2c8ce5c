mod config;
mod logging;
mod signals;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use casemall::CasemallModule;
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, CliOverrides, DatabaseConfig};

/// Casemall Server - phone accessory storefront backend
#[derive(Parser)]
#[command(name = "casemall-server")]
#[command(about = "Casemall Server - phone accessory storefront backend")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use mock database (sqlite::memory:)
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML -> 3) env (CASEMALL__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        port: cli.port,
        mock: cli.mock,
    })?;

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let _log_guard = logging::init_logging(&config.logging, cli.verbose)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn connect_db(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let max_conns = if cfg.is_in_memory() { 1 } else { cfg.max_conns };
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.max_connections(max_conns)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(false);

    tracing::info!(dsn = %cfg.redacted_dsn(), max_conns, "Connecting to database");
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {}", cfg.redacted_dsn()))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Casemall Server starting");
    let addr = config.bind_addr()?;

    let db = connect_db(&config.database).await?;
    if config.database.run_migrations {
        CasemallModule::migrate(&db).await?;
    }

    tokio::fs::create_dir_all(&config.casemall.image_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create image dir {}",
                config.casemall.image_dir.display()
            )
        })?;

    let module = CasemallModule::init(db, config.casemall.clone())?;
    let timeout = Duration::from_secs(config.server.request_timeout_secs);
    let app = module
        .router()
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = signals::wait_for_shutdown().await {
                tracing::error!(error = %e, "Signal handling failed");
            }
        })
        .await
        .context("HTTP server failed")?;

    tracing::info!("Casemall Server stopped");
    Ok(())
}
