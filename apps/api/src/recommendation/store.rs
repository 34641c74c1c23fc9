//! Read-only storage collaborator for the recommendation engine.
//!
//! `AppState` holds an `Arc<dyn JobStore>`; production uses `PgJobStore`.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use crate::models::job_posting::JobPostingRow;
use crate::models::seeker::JobSeekerRow;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Queries the recommendation engine and its HTTP surface need.
///
/// None of these mutate anything.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn find_seeker_by_user_id(&self, user_id: &str)
        -> Result<Option<JobSeekerRow>, StoreError>;

    async fn find_applied_job_posting_ids(&self, user_id: &str) -> Result<HashSet<i32>, StoreError>;

    /// Active postings not in `exclude_ids`, newest `posted_date` first,
    /// at most `max_count` rows, with company info attached.
    async fn find_active_unapplied_postings(
        &self,
        exclude_ids: &HashSet<i32>,
        max_count: usize,
    ) -> Result<Vec<JobPostingRow>, StoreError>;

    /// Maps job posting id to application id for the seeker's applications.
    async fn find_application_ids_by_posting(
        &self,
        user_id: &str,
    ) -> Result<HashMap<i32, i32>, StoreError>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn find_seeker_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<JobSeekerRow>, StoreError> {
        let seeker = sqlx::query_as::<_, JobSeekerRow>(
            r#"
            SELECT id, user_id, skills, experience, education, address
            FROM job_seekers
            WHERE user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(user_id, found = seeker.is_some(), "Seeker profile lookup");
        Ok(seeker)
    }

    async fn find_applied_job_posting_ids(&self, user_id: &str) -> Result<HashSet<i32>, StoreError> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT a.job_posting_id
            FROM job_applications a
            JOIN job_seekers s ON s.id = a.job_seeker_id
            WHERE s.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id, applied = ids.len(), "Loaded applied job ids");
        Ok(ids.into_iter().collect())
    }

    async fn find_active_unapplied_postings(
        &self,
        exclude_ids: &HashSet<i32>,
        max_count: usize,
    ) -> Result<Vec<JobPostingRow>, StoreError> {
        let exclude: Vec<i32> = exclude_ids.iter().copied().collect();
        let max_count = i64::try_from(max_count).unwrap_or(i64::MAX);

        let postings = sqlx::query_as::<_, JobPostingRow>(
            r#"
            SELECT p.id, p.title, p.description, p.requirements, p.location,
                   p.salary::float8 AS salary, p.job_type, p.posted_date,
                   p.deadline_date, p.is_active,
                   c.id AS company_id, c.company_name, c.industry, c.website
            FROM job_postings p
            JOIN companies c ON c.id = p.company_id
            WHERE p.is_active AND p.id <> ALL($1)
            ORDER BY p.posted_date DESC
            LIMIT $2
            "#,
        )
        .bind(&exclude)
        .bind(max_count)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            excluded = exclude.len(),
            fetched = postings.len(),
            "Loaded candidate pool"
        );
        Ok(postings)
    }

    async fn find_application_ids_by_posting(
        &self,
        user_id: &str,
    ) -> Result<HashMap<i32, i32>, StoreError> {
        let rows: Vec<(i32, i32)> = sqlx::query_as(
            r#"
            SELECT a.job_posting_id, a.id
            FROM job_applications a
            JOIN job_seekers s ON s.id = a.job_seeker_id
            WHERE s.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
