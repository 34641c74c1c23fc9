//! In-memory `JobStore` used by engine and router tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::models::job_posting::{CompanySummary, JobPostingRow};
use crate::models::seeker::JobSeekerRow;
use crate::recommendation::store::{JobStore, StoreError};

/// An application row: (application id, seeker user id, job posting id).
type Application = (i32, String, i32);

#[derive(Default)]
pub struct InMemoryJobStore {
    pub seekers: Vec<JobSeekerRow>,
    pub postings: Vec<JobPostingRow>,
    pub applications: Vec<Application>,
    pub pool_queries: AtomicUsize,
    /// Return applied postings from the pool query, like a stale replica would.
    pub ignore_exclusions: bool,
}

impl InMemoryJobStore {
    pub fn with_seeker(mut self, user_id: &str, skills: &str, address: &str) -> Self {
        let id = self.seekers.len() as i32 + 1;
        self.seekers.push(JobSeekerRow {
            id,
            user_id: user_id.to_string(),
            skills: Some(skills.to_string()),
            experience: None,
            education: None,
            address: Some(address.to_string()),
        });
        self
    }

    pub fn ignoring_exclusions(mut self) -> Self {
        self.ignore_exclusions = true;
        self
    }

    pub fn with_posting(mut self, posting: JobPostingRow) -> Self {
        self.postings.push(posting);
        self
    }

    pub fn with_application(mut self, application_id: i32, user_id: &str, job_id: i32) -> Self {
        self.applications
            .push((application_id, user_id.to_string(), job_id));
        self
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn find_seeker_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<JobSeekerRow>, StoreError> {
        Ok(self.seekers.iter().find(|s| s.user_id == user_id).cloned())
    }

    async fn find_applied_job_posting_ids(&self, user_id: &str) -> Result<HashSet<i32>, StoreError> {
        Ok(self
            .applications
            .iter()
            .filter(|(_, uid, _)| uid == user_id)
            .map(|(_, _, job_id)| *job_id)
            .collect())
    }

    async fn find_active_unapplied_postings(
        &self,
        exclude_ids: &HashSet<i32>,
        max_count: usize,
    ) -> Result<Vec<JobPostingRow>, StoreError> {
        self.pool_queries.fetch_add(1, Ordering::SeqCst);
        let mut postings: Vec<JobPostingRow> = self
            .postings
            .iter()
            .filter(|p| {
                p.is_active && (self.ignore_exclusions || !exclude_ids.contains(&p.id))
            })
            .cloned()
            .collect();
        postings.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));
        postings.truncate(max_count);
        Ok(postings)
    }

    async fn find_application_ids_by_posting(
        &self,
        user_id: &str,
    ) -> Result<HashMap<i32, i32>, StoreError> {
        Ok(self
            .applications
            .iter()
            .filter(|(_, uid, _)| uid == user_id)
            .map(|(app_id, _, job_id)| (*job_id, *app_id))
            .collect())
    }
}

/// A store whose every query fails, for error propagation tests.
pub struct FailingJobStore;

#[async_trait]
impl JobStore for FailingJobStore {
    async fn find_seeker_by_user_id(
        &self,
        _user_id: &str,
    ) -> Result<Option<JobSeekerRow>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_applied_job_posting_ids(&self, _user_id: &str) -> Result<HashSet<i32>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_active_unapplied_postings(
        &self,
        _exclude_ids: &HashSet<i32>,
        _max_count: usize,
    ) -> Result<Vec<JobPostingRow>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_application_ids_by_posting(
        &self,
        _user_id: &str,
    ) -> Result<HashMap<i32, i32>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Builds an active posting `age_days` old relative to `now`.
pub fn posting(
    id: i32,
    title: &str,
    requirements: &str,
    location: &str,
    now: DateTime<Utc>,
    age_days: i64,
) -> JobPostingRow {
    JobPostingRow {
        id,
        title: title.to_string(),
        description: String::new(),
        requirements: requirements.to_string(),
        location: location.to_string(),
        salary: None,
        job_type: "FullTime".to_string(),
        posted_date: now - Duration::days(age_days),
        deadline_date: None,
        is_active: true,
        company: CompanySummary {
            company_id: 7,
            company_name: "Initech".to_string(),
            industry: "Software".to_string(),
            website: "https://initech.test".to_string(),
        },
    }
}
