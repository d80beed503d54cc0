use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::Candidate;
use crate::model::Metrics;
use crate::scoring::hours_between;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingConfig {
    pub views: f64,
    pub likes: f64,
    pub shares: f64,
    pub saves: f64,
    /// e-folding time of the recency decay, in hours.
    pub decay_hours: f64,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            views: 0.3,
            likes: 5.0,
            shares: 10.0,
            saves: 3.0,
            decay_hours: 48.0,
        }
    }
}

pub fn velocity(metrics: &Metrics, config: &TrendingConfig) -> f64 {
    metrics.views_24h as f64 * config.views
        + metrics.likes_24h as f64 * config.likes
        + metrics.shares_24h as f64 * config.shares
}

pub fn save_boost(metrics: &Metrics, config: &TrendingConfig) -> f64 {
    metrics.saves as f64 * config.saves
}

/// `exp(-age_hours / decay_hours)`. Content without a creation time decays to zero.
pub fn recency(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>, decay_hours: f64) -> f64 {
    match created_at {
        Some(created_at) => (-hours_between(created_at, now) / decay_hours).exp(),
        None => 0.0,
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrendingScorer {
    config: TrendingConfig,
}

impl TrendingScorer {
    pub fn new(config: TrendingConfig) -> Self {
        Self { config }
    }

    pub fn score<C: Candidate>(&self, candidate: &C, now: DateTime<Utc>) -> f64 {
        let metrics = candidate.metrics();
        let engagement = velocity(metrics, &self.config) + save_boost(metrics, &self.config);
        engagement * recency(candidate.created_at(), now, self.config.decay_hours)
    }
}
