//! Recommendation engine — ranks active, unapplied postings for a seeker.
//!
//! Default: `KeywordRecommender` (skill token overlap + location + recency).
//! `AppState` holds an `Arc<dyn JobRecommender>`.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::job_posting::JobPostingRow;
use crate::recommendation::policy::ScoringPolicy;
use crate::recommendation::scoring::{score_posting, ScoredPosting, SeekerSignals};
use crate::recommendation::store::{JobStore, StoreError};

/// Implement this to swap ranking strategies without touching handlers.
#[async_trait]
pub trait JobRecommender: Send + Sync {
    /// Ranked postings with score breakdowns, at most `limit` of them.
    async fn recommend_scored(
        &self,
        user_id: &str,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredPosting>, StoreError>;

    /// Ranked postings, at most `limit` of them.
    async fn recommend(
        &self,
        user_id: &str,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<JobPostingRow>, StoreError> {
        let scored = self.recommend_scored(user_id, limit, now).await?;
        Ok(scored.into_iter().map(|s| s.job).collect())
    }
}

/// Keyword-based recommender. Deterministic for a fixed `now`.
///
/// Algorithm:
/// 1. Load the seeker profile; no profile → empty result.
/// 2. Load applied posting ids and fetch at most `candidate_pool_ceiling`
///    active, unapplied postings, newest first.
/// 3. Score each candidate in memory (see `scoring::score_posting`).
/// 4. Sort by total desc, then `posted_date` desc, and keep `limit`.
pub struct KeywordRecommender {
    store: Arc<dyn JobStore>,
    policy: ScoringPolicy,
}

impl KeywordRecommender {
    pub fn new(store: Arc<dyn JobStore>, policy: ScoringPolicy) -> Self {
        Self { store, policy }
    }
}

#[async_trait]
impl JobRecommender for KeywordRecommender {
    async fn recommend_scored(
        &self,
        user_id: &str,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredPosting>, StoreError> {
        let Some(seeker) = self.store.find_seeker_by_user_id(user_id).await? else {
            return Ok(Vec::new());
        };

        let applied_ids = self.store.find_applied_job_posting_ids(user_id).await?;

        let candidates = self
            .store
            .find_active_unapplied_postings(&applied_ids, self.policy.candidate_pool_ceiling)
            .await?;

        let signals = SeekerSignals::new(seeker.skills.as_deref(), seeker.address.as_deref());

        // Exclusion is enforced here as well as in the store query.
        let mut scored: Vec<ScoredPosting> = candidates
            .into_iter()
            .filter(|job| !applied_ids.contains(&job.id))
            .map(|job| {
                let score = score_posting(&signals, &job, now, &self.policy);
                ScoredPosting { job, score }
            })
            .collect();

        scored.sort_by(rank_order);
        scored.truncate(limit);

        Ok(scored)
    }
}

/// Higher total first; newer `posted_date` breaks ties.
fn rank_order(a: &ScoredPosting, b: &ScoredPosting) -> Ordering {
    b.score
        .total
        .total_cmp(&a.score.total)
        .then_with(|| b.job.posted_date.cmp(&a.job.posted_date))
}
