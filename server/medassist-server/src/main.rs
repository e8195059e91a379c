use clap::Parser;
use colored::*;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{info, warn};

use config_engine::{AppConfig, ConfigLoader, StorageBackend};
use error_common::{log_error, MedAssistError, Result};
use medassist_server::{create_app, MedAssistServer};

/// MedAssist DZ HTTP Server
#[derive(Parser, Debug)]
#[command(name = "medassist-server")]
#[command(about = "Clinic records and consultation assistant HTTP API server")]
struct Args {
    /// Server bind address
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Configuration file path (TOML, YAML or JSON)
    #[arg(short, long, env = "MEDASSIST_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Keep records in memory instead of PostgreSQL
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    logger_redacted::init(&config.logging)
        .map_err(|e| MedAssistError::InternalError(format!("Logger init failed: {}", e)))?;

    if std::io::stdout().is_terminal() && !config.logging.json {
        print_startup_banner();
    }

    if let Err(e) = run(config).await {
        log_error("medassist-server", &e);
        return Err(e);
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    let mut config = loader
        .load()
        .map_err(|e| MedAssistError::ConfigError(e.to_string()))?;

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.memory {
        config.database.backend = StorageBackend::Memory;
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }

    config
        .validate()
        .map_err(|e| MedAssistError::ConfigError(e.to_string()))?;
    Ok(config)
}

async fn run(config: AppConfig) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    info!("🏥 {}", format!("Starting {}", config.server.name).bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());
    info!("🌐 Bind address: {}", addr.bright_yellow());

    let server = MedAssistServer::new(config).await?;
    info!("💾 Storage backend: {}", server.store.backend_name().bright_white());

    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MedAssistError::NetworkError(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("🚀 {}", format!("MedAssist running on http://{}", addr).bright_green());
    info!("📋 {}", format!("Dashboard: http://{}/", addr).bright_blue());
    info!("📋 {}", format!("API: http://{}/api", addr).bright_blue());
    info!("📋 {}", format!("OpenAPI document: http://{}/api-docs/openapi.json", addr).bright_blue());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MedAssistError::ServerError(format!("HTTP server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║                        🏥 MEDASSIST DZ                       ║".bright_cyan());
    println!("{}", "║              Gestion de cabinet et aide à la consultation    ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}
