use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use courtside::api::state::AppState;
use courtside::config::AppConfig;
use courtside::notify::TracingNotifier;
use courtside::service::MatchService;
use courtside::storage::InMemoryMatchStore;

#[derive(Parser)]
#[command(name = "courtside")]
#[command(about = "Tennis match scoring service with a REST API")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    let fmt_layer = if cli.json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();

    tracing::info!("Starting courtside v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let service = MatchService::new(
                Arc::new(InMemoryMatchStore::new()),
                Arc::new(TracingNotifier::new()),
            );
            let state = AppState::new(service);
            let app = courtside::api::build_router(state);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
