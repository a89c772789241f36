//! SiteGate production server
//!
//! Public front door of the website builder: resolves every request to the
//! admin domain or a tenant site and renders tenant pages from their theme.
//!
//! Usage:
//! ```bash
//! # Start with defaults
//! sitegate-server
//!
//! # Start with a config file
//! sitegate-server --config sitegate.yaml
//!
//! # Override the listen address
//! SITEGATE_PORT=8080 sitegate-server --host 0.0.0.0
//! ```

mod app;
mod config;

use anyhow::Context;
use clap::Parser;
use config::ServerConfig;
use sitegate_themes::ThemeRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "sitegate-server")]
#[command(about = "SiteGate tenant-aware site router", long_about = None)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "SITEGATE_CONFIG")]
    config: Option<String>,

    /// Address to listen on
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = if let Some(ref path) = cli.config {
        ServerConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path))?
    } else {
        ServerConfig::default()
    };

    // Merge environment variables (they override config file)
    config.merge_env();

    // CLI flags have the highest precedence
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    config.validate()?;

    init_tracing(&config)?;

    info!("Initializing SiteGate");
    if let Some(ref path) = cli.config {
        info!("Configuration loaded from {}", path);
    }

    let registry = Arc::new(ThemeRegistry::builtin());
    info!(
        "Registered {} themes: {}",
        registry.len(),
        registry
            .theme_ids()
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!("Tenant base domains: {}", config.tenancy.base_domains.join(", "));
    info!("Project backend: {}", config.backend.base_url);

    let app = app::build_app(&config, registry)?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr).await?;

    info!("SiteGate listening on http://{}", addr);
    info!("   Health:  http://{}/healthz", addr);
    info!("   Metrics: http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("SiteGate stopped");
    Ok(())
}

/// Install the global subscriber for the configured level and format
fn init_tracing(config: &ServerConfig) -> anyhow::Result<()> {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Access logs from TraceLayer only at debug and below
    let mut filter = EnvFilter::new(format!("{}", log_level));
    if log_level < Level::DEBUG {
        match "tower_http=warn".parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => tracing::warn!("Failed to set tower_http log filter: {}", e),
        }
    }

    if config.logging.json {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
