use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Job-seeker profile fields read by the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSeekerRow {
    pub id: i32,
    pub user_id: String,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    /// Free-text address, used as a coarse location signal.
    pub address: Option<String>,
}
