use serde::{Deserialize, Serialize};

use crate::filter::Candidate;
use crate::model::{Event, Metrics, UserProfile};

/// Weights of the personalisation recipe shared by both for-you feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalConfig {
    pub tag_affinity: f64,
    /// Flat bonus for content by a followed author; sized to beat a single tag match.
    pub follow_bonus: f64,
    pub saves: f64,
    pub view_time: f64,
    pub likes: f64,
    pub shares: f64,
    /// Per-unit-weight multiplier applied when an event mood is a preferred tag.
    pub mood_boost: f64,
}

impl Default for PersonalConfig {
    fn default() -> Self {
        Self {
            tag_affinity: 10.0,
            follow_bonus: 100.0,
            saves: 5.0,
            view_time: 3.0,
            likes: 2.0,
            shares: 4.0,
            mood_boost: 0.2,
        }
    }
}

/// Sum of the user's weights for every tag on the content; unknown tags add nothing.
pub fn tag_affinity(tags: &[String], user: &UserProfile) -> f64 {
    tags.iter().filter_map(|tag| user.tag_weight(tag)).sum()
}

/// Content dwell relative to the user's baseline, only when the content holds attention longer.
pub fn view_time_ratio(metrics: &Metrics, user: &UserProfile) -> f64 {
    let baseline = user.view_time_baseline();
    let dwell = metrics.avg_view_ms as f64;
    if dwell > baseline {
        dwell / baseline
    } else {
        0.0
    }
}

pub fn social(metrics: &Metrics, config: &PersonalConfig) -> f64 {
    metrics.likes_24h as f64 * config.likes + metrics.shares_24h as f64 * config.shares
}

#[derive(Debug, Clone, Default)]
pub struct PersonalScorer {
    config: PersonalConfig,
}

impl PersonalScorer {
    pub fn new(config: PersonalConfig) -> Self {
        Self { config }
    }

    pub fn score<C: Candidate>(&self, candidate: &C, user: &UserProfile) -> f64 {
        let metrics = candidate.metrics();
        let mut score = tag_affinity(candidate.tags(), user) * self.config.tag_affinity;

        if user.follows(candidate.author_id()) {
            score += self.config.follow_bonus;
        }

        score += metrics.saves as f64 * self.config.saves;
        score += view_time_ratio(metrics, user) * self.config.view_time;
        score += social(metrics, &self.config);

        score
    }

    pub fn score_event(&self, event: &Event, user: &UserProfile) -> f64 {
        let score = self.score(event, user);
        match event.mood().and_then(|mood| user.tag_weight(mood)) {
            Some(weight) => score * (1.0 + weight * self.config.mood_boost),
            None => score,
        }
    }
}
