use std::sync::Arc;

use crate::config::Config;
use crate::recommendation::engine::JobRecommender;
use crate::recommendation::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only job board queries. Default: PgJobStore.
    pub store: Arc<dyn JobStore>,
    /// Pluggable ranking strategy. Default: KeywordRecommender over `store`.
    pub recommender: Arc<dyn JobRecommender>,
    pub config: Config,
}
