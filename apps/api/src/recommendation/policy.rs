use anyhow::{bail, Context, Result};

/// Tunable weights and bounds for recommendation scoring.
///
/// Defaults reproduce the production ranking exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    /// Most recent postings fetched for in-memory scoring.
    pub candidate_pool_ceiling: usize,
    /// Points per skill token shared between seeker and posting.
    pub skill_weight: f64,
    /// Points when the posting location contains the seeker address.
    pub location_weight: f64,
    /// Recency bonus for a posting published at `now`.
    pub recency_max_bonus: f64,
    /// Age in days after which a posting earns no further decay.
    pub recency_window_days: f64,
    /// Days per point of recency decay.
    pub recency_decay_days: f64,
    /// Result size when the caller does not pass a limit.
    pub default_limit: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            candidate_pool_ceiling: 250,
            skill_weight: 3.0,
            location_weight: 2.0,
            recency_max_bonus: 3.0,
            recency_window_days: 30.0,
            recency_decay_days: 10.0,
            default_limit: 6,
        }
    }
}

impl ScoringPolicy {
    /// Builds a policy from `RECO_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a policy from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let policy = Self {
            candidate_pool_ceiling: parse_or(
                &lookup,
                "RECO_CANDIDATE_POOL_CEILING",
                defaults.candidate_pool_ceiling,
            )?,
            skill_weight: parse_or(&lookup, "RECO_SKILL_WEIGHT", defaults.skill_weight)?,
            location_weight: parse_or(&lookup, "RECO_LOCATION_WEIGHT", defaults.location_weight)?,
            recency_max_bonus: parse_or(
                &lookup,
                "RECO_RECENCY_MAX_BONUS",
                defaults.recency_max_bonus,
            )?,
            recency_window_days: parse_or(
                &lookup,
                "RECO_RECENCY_WINDOW_DAYS",
                defaults.recency_window_days,
            )?,
            recency_decay_days: parse_or(
                &lookup,
                "RECO_RECENCY_DECAY_DAYS",
                defaults.recency_decay_days,
            )?,
            default_limit: parse_or(&lookup, "RECO_DEFAULT_LIMIT", defaults.default_limit)?,
        };

        policy.validate()?;
        Ok(policy)
    }

    /// Rejects values that would make the ranking meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.candidate_pool_ceiling == 0 {
            bail!("RECO_CANDIDATE_POOL_CEILING must be at least 1");
        }
        if self.default_limit == 0 {
            bail!("RECO_DEFAULT_LIMIT must be at least 1");
        }
        for (key, value) in [
            ("RECO_SKILL_WEIGHT", self.skill_weight),
            ("RECO_LOCATION_WEIGHT", self.location_weight),
            ("RECO_RECENCY_MAX_BONUS", self.recency_max_bonus),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{key} must be a non-negative number, got {value}");
            }
        }
        for (key, value) in [
            ("RECO_RECENCY_WINDOW_DAYS", self.recency_window_days),
            ("RECO_RECENCY_DECAY_DAYS", self.recency_decay_days),
        ] {
            if !value.is_finite() || value <= 0.0 {
                bail!("{key} must be a positive number, got {value}");
            }
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
