//! salary-engine: HTTP service for departmental salary calculation runs.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use salary_engine::api::{AppState, create_router};
use salary_engine::config::ConfigLoader;
use salary_engine::engine::{ENGINE_VERSION, SalaryCalculator};
use salary_engine::store::InMemoryStore;

#[derive(Parser, Debug)]
#[command(name = "salary-engine")]
#[command(about = "Departmental salary calculation service")]
#[command(version)]
struct Args {
    /// Directory holding engine.yaml
    #[arg(long, default_value = "config/default", env = "SALARY_ENGINE_CONFIG_DIR")]
    config_dir: PathBuf,

    /// YAML snapshot of reference data to serve from the in-memory store
    #[arg(long, default_value = "config/default/snapshot.yaml", env = "SALARY_ENGINE_SNAPSHOT")]
    snapshot: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5780", env = "SALARY_ENGINE_BIND")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salary_engine=info".into()),
        )
        .init();

    let args = Args::parse();
    info!("Starting salary-engine v{}", ENGINE_VERSION);

    let config = ConfigLoader::load(&args.config_dir)
        .with_context(|| format!("loading configuration from {}", args.config_dir.display()))?;
    info!("Configuration loaded from {}", args.config_dir.display());

    let store = InMemoryStore::load(&args.snapshot)
        .with_context(|| format!("loading snapshot {}", args.snapshot.display()))?;
    info!("Snapshot loaded from {}", args.snapshot.display());

    let calculator = SalaryCalculator::new(Arc::new(store), Arc::new(config.into_config()));
    let app = create_router(AppState::new(calculator));

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!("salary-engine listening on http://{}", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
