use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use horizon_app::state::AppState;
use horizon_core::config::HorizonConfig;
use horizon_core::{ConfigError, HorizonError};
use horizon_sim::ScenarioEngine;

/// ImpactHorizon asteroid impact analysis server
#[derive(Parser, Debug)]
#[command(name = "impact-horizon")]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Path to a JSON configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Upper bound on one scenario run, in seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] HorizonError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Shutting down");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run(args: Args) -> Result<(), StartupError> {
    let config = HorizonConfig::load_or_default(args.config.as_deref())?;
    info!(
        config = ?args.config,
        population = ?config.sources.population_raster,
        land_cover = ?config.sources.land_cover_raster,
        overpass = ?config.sources.overpass_url,
        "Configuration loaded"
    );

    // The engine owns a blocking HTTP client, which must be created and
    // dropped outside the async runtime.
    let engine = Arc::new(ScenarioEngine::from_config(&config)?);
    let state = AppState {
        engine: Arc::clone(&engine),
        timeout: Duration::from_secs(args.timeout_secs),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(args.bind, state))?;
    drop(runtime);

    info!("Server stopped");
    Ok(())
}

async fn serve(bind: SocketAddr, state: AppState) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %bind, "ImpactHorizon listening");

    axum::serve(listener, horizon_app::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
