mod config;
mod db;
mod errors;
mod models;
mod recommendation;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::recommendation::engine::KeywordRecommender;
use crate::recommendation::store::{JobStore, PgJobStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentLink API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    let store: Arc<dyn JobStore> = Arc::new(PgJobStore::new(db));

    let policy = config.recommendation.clone();
    info!(
        "Recommendation policy: pool ceiling {}, skill x{}, location +{}, recency {} over {} days, default limit {}",
        policy.candidate_pool_ceiling,
        policy.skill_weight,
        policy.location_weight,
        policy.recency_max_bonus,
        policy.recency_window_days,
        policy.default_limit
    );
    let recommender = Arc::new(KeywordRecommender::new(store.clone(), policy));

    // Build app state
    let state = AppState {
        store,
        recommender,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the job board's web origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
