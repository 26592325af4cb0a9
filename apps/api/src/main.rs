mod config;
mod errors;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::resume::store::{FileResumeStore, MemoryResumeStore, ResumeStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ResumeStore> = match config.store_backend {
        StoreBackend::File => {
            let store = FileResumeStore::open(&config.data_dir).await?;
            info!("Resume store at {}", store.path().display());
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("Using in-memory resume store; edits are lost on restart");
            Arc::new(MemoryResumeStore::new())
        }
    };

    let state = AppState {
        config: config.clone(),
        store,
    };

    // TODO: restrict CORS to the site origin once it is configurable
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
