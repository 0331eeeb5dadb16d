use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod config;
mod dashboard;
mod error;
mod stats;
mod store;

use config::Config;
use dashboard::AppState;
use stats::{NormalizerConfig, PredictorConfig};
use store::{JsonDirSource, RecordSource, RecordStore, SharedSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // Load once up front even in reload mode so broken files fail at startup
    let store = RecordStore::load(&config.data_dir)
        .await
        .with_context(|| format!("loading records from {}", config.data_dir))?;
    let (pools, teams, players) = store.counts();
    info!(
        "Loaded {} pools, {} teams, {} players from {}",
        pools, teams, players, config.data_dir
    );

    let source: Arc<dyn RecordSource> = if config.reload_data {
        Arc::new(JsonDirSource::new(&config.data_dir))
    } else {
        Arc::new(SharedSource::new(store))
    };
    info!(
        "Record source: {} (missing-team policy: {:?})",
        source.name(),
        config.missing_team_policy
    );

    let state = AppState {
        source,
        missing_team_policy: config.missing_team_policy,
        normalizer: NormalizerConfig::default(),
        predictor: PredictorConfig::default(),
        static_dir: PathBuf::from(&config.static_dir),
    };
    let app = dashboard::router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
