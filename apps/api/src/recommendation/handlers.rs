//! Axum route handlers for the Recommendation API.

use std::collections::HashMap;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::job_posting::JobPostingRow;
use crate::recommendation::scoring::ScoredPosting;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedJobsResponse {
    pub jobs: Vec<JobPostingRow>,
    /// job posting id → application id, for "view application" links.
    pub applications_by_job_id: HashMap<i32, i32>,
}

#[derive(Debug, Serialize)]
pub struct ScoredJobsResponse {
    pub jobs: Vec<ScoredPosting>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/recommendations
///
/// Ranked open postings for a seeker, plus the seeker's existing
/// applications keyed by posting id.
pub async fn handle_recommended(
    State(state): State<AppState>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<RecommendedJobsResponse>, AppError> {
    let Query(params) = query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let (user_id, limit) = validate_query(&params, state.config.recommendation.default_limit)?;

    let jobs = state.recommender.recommend(user_id, limit, Utc::now()).await?;
    let applications_by_job_id = state.store.find_application_ids_by_posting(user_id).await?;

    debug!(user_id, limit, returned = jobs.len(), "Served recommendations");

    Ok(Json(RecommendedJobsResponse {
        jobs,
        applications_by_job_id,
    }))
}

/// GET /api/v1/recommendations/scored
///
/// Same ranking with the per-component score breakdown for each posting.
pub async fn handle_recommended_scored(
    State(state): State<AppState>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<ScoredJobsResponse>, AppError> {
    let Query(params) = query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let (user_id, limit) = validate_query(&params, state.config.recommendation.default_limit)?;

    let jobs = state
        .recommender
        .recommend_scored(user_id, limit, Utc::now())
        .await?;

    debug!(user_id, limit, returned = jobs.len(), "Served scored recommendations");

    Ok(Json(ScoredJobsResponse { jobs }))
}

/// Rejects a missing or blank user id and non-positive limits before the engine runs.
fn validate_query(
    params: &RecommendationQuery,
    default_limit: usize,
) -> Result<(&str, usize), AppError> {
    let user_id = params.user_id.as_deref().map(str::trim).unwrap_or_default();
    if user_id.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let limit = match params.limit {
        None => default_limit,
        Some(n) if n >= 1 => usize::try_from(n)
            .map_err(|_| AppError::Validation(format!("limit {n} is too large")))?,
        Some(n) => {
            return Err(AppError::Validation(format!(
                "limit must be a positive integer, got {n}"
            )))
        }
    };

    Ok((user_id, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(user_id: &str, limit: Option<i64>) -> RecommendationQuery {
        RecommendationQuery {
            user_id: Some(user_id.to_string()),
            limit,
        }
    }

    #[test]
    fn test_missing_limit_uses_default() {
        let params = query("u1", None);
        assert_eq!(validate_query(&params, 6).unwrap(), ("u1", 6));
    }

    #[test]
    fn test_explicit_limit_is_kept() {
        let params = query("u1", Some(12));
        assert_eq!(validate_query(&params, 6).unwrap(), ("u1", 12));
    }

    #[test]
    fn test_non_positive_limit_is_rejected() {
        for n in [0, -3] {
            let params = query("u1", Some(n));
            assert!(matches!(
                validate_query(&params, 6),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_blank_user_id_is_unauthorized() {
        let params = query("  ", Some(3));
        assert!(matches!(validate_query(&params, 6), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_missing_user_id_is_unauthorized() {
        let params = RecommendationQuery {
            user_id: None,
            limit: None,
        };
        assert!(matches!(validate_query(&params, 6), Err(AppError::Unauthorized)));
    }
}
