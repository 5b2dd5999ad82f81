mod adverts;
mod config;
mod cv;
mod directory;
mod errors;
mod llm_client;
mod models;
mod preferences;
mod profile;
mod publications;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::preferences::{MemoryPreferenceStore, PreferenceStore, RedisPreferenceStore};
use crate::profile::bio::LlmBioGenerator;
use crate::routes::build_router;
use crate::session::Session;
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

    info!("Starting Scholar API v{}", env!("CARGO_PKG_VERSION"));

    // LLM client is optional; without a key bio generation answers with a
    // configuration message.
    let llm = config.api_key.clone().map(|key| {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
        LlmClient::new(key, config.llm_api_base.clone())
    });
    let bio_generator = Arc::new(LlmBioGenerator::new(llm));

    let preferences: Arc<dyn PreferenceStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Redis preference store initialized");
            Arc::new(RedisPreferenceStore::new(client))
        }
        None => {
            info!("REDIS_URL not set; theme preference kept in memory");
            Arc::new(MemoryPreferenceStore::default())
        }
    };

    let theme = match preferences.load_theme().await {
        Ok(theme) => theme,
        Err(e) => {
            warn!("Could not load stored theme, using default: {e}");
            None
        }
    };

    let state = AppState::new(
        Session::seeded(),
        bio_generator,
        preferences,
        theme,
        config.clone(),
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
