use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Owning company, attached to each posting for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompanySummary {
    pub company_id: i32,
    pub company_name: String,
    pub industry: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub salary: Option<f64>,
    pub job_type: String,
    pub posted_date: DateTime<Utc>,
    pub deadline_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[sqlx(flatten)]
    pub company: CompanySummary,
}
