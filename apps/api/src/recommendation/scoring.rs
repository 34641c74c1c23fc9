use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::job_posting::JobPostingRow;
use crate::recommendation::policy::ScoringPolicy;
use crate::recommendation::tokenize::tokenize;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Per-component score for one candidate posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_hits: usize,
    /// Shared skill tokens, sorted for stable output.
    pub matched_skills: Vec<String>,
    pub skill_score: f64,
    pub location_score: f64,
    pub recency_bonus: f64,
    pub total: f64,
}

/// A candidate posting paired with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPosting {
    pub job: JobPostingRow,
    pub score: ScoreBreakdown,
}

/// Seeker-side inputs, tokenized once and reused across every candidate.
pub struct SeekerSignals<'a> {
    pub skill_tokens: HashSet<String>,
    pub address: Option<&'a str>,
}

impl<'a> SeekerSignals<'a> {
    pub fn new(skills: Option<&str>, address: Option<&'a str>) -> Self {
        Self {
            skill_tokens: tokenize(skills.unwrap_or_default()),
            address,
        }
    }
}

/// Scores a single posting against a seeker.
pub fn score_posting(
    seeker: &SeekerSignals<'_>,
    job: &JobPostingRow,
    now: DateTime<Utc>,
    policy: &ScoringPolicy,
) -> ScoreBreakdown {
    let mut matched_skills: Vec<String> = if seeker.skill_tokens.is_empty() {
        Vec::new()
    } else {
        let text = format!("{} {} {}", job.title, job.description, job.requirements);
        let job_tokens = tokenize(&text);
        seeker
            .skill_tokens
            .intersection(&job_tokens)
            .cloned()
            .collect()
    };
    matched_skills.sort();

    let skill_hits = matched_skills.len();
    let skill_score = skill_hits as f64 * policy.skill_weight;
    let location_score = if location_matches(seeker.address, &job.location) {
        policy.location_weight
    } else {
        0.0
    };
    let recency_bonus = recency_bonus(job.posted_date, now, policy);

    ScoreBreakdown {
        skill_hits,
        matched_skills,
        skill_score,
        location_score,
        recency_bonus,
        total: skill_score + location_score + recency_bonus,
    }
}

/// True when both sides are non-blank and `location` contains `address`,
/// ignoring case. This is substring containment, not token overlap.
pub fn location_matches(address: Option<&str>, location: &str) -> bool {
    let Some(address) = address else {
        return false;
    };
    if address.trim().is_empty() || location.trim().is_empty() {
        return false;
    }
    location.to_lowercase().contains(&address.to_lowercase())
}

/// Linear decay from `recency_max_bonus` at age zero, with age clamped to
/// `[0, recency_window_days]`. Future-dated postings count as brand new.
pub fn recency_bonus(
    posted_date: DateTime<Utc>,
    now: DateTime<Utc>,
    policy: &ScoringPolicy,
) -> f64 {
    let days_old = (now - posted_date).num_milliseconds() as f64 / MILLIS_PER_DAY;
    let days_old = days_old.clamp(0.0, policy.recency_window_days);
    policy.recency_max_bonus - days_old / policy.recency_decay_days
}
