use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use supplychain_api::data::load_snapshot;
use supplychain_api::server::config::ServerConfig;
use supplychain_api::version::VERSION;
use supplychain_api::web::create_axum_router;

#[derive(Parser, Debug)]
#[command(author, version = VERSION, about = "Supply-chain analytics HTTP API", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset CSV to serve; overrides the config file and DATASET_PATH
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

fn init_logging(log_dir: &Path) {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily(log_dir, "server.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler.");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler.");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received, stopping server.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let config = ServerConfig::load(args.config.as_deref(), args.dataset)?;

    init_logging(&config.log_dir);
    info!("Starting server, version: {}", VERSION);
    info!(
        dataset = %config.dataset_path.display(),
        listen_addr = %config.listen_addr,
        log_dir = %config.log_dir.display(),
        "Configuration loaded."
    );

    // The snapshot must be complete before the listener is bound.
    let snapshot = match load_snapshot(&config.dataset_path) {
        Ok(snapshot) => Arc::new(snapshot),
        Err(e) => {
            error!(error = %e, "Failed to load dataset. Refusing to start.");
            return Err(e.into());
        }
    };

    let app = create_axum_router(snapshot);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(address = %config.listen_addr, "HTTP server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}
