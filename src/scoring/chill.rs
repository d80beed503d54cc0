use serde::{Deserialize, Serialize};

use crate::model::Event;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChillConfig {
    /// Tag substrings that mark an event as chill, matched ignoring ASCII case.
    pub keywords: Vec<String>,
    pub ideal_capacity: (u64, u64),
    pub acceptable_capacity: (u64, u64),
    pub ideal_score: f64,
    pub acceptable_score: f64,
    pub fallback_score: f64,
    pub mood_bonus: f64,
    pub saves: f64,
    pub hype_threshold: f64,
    pub hype_penalty: f64,
}

impl Default for ChillConfig {
    fn default() -> Self {
        Self {
            keywords: [
                "chill", "relax", "casual", "hangout", "coffee", "lounge", "calm", "peaceful",
            ]
            .iter()
            .map(|keyword| keyword.to_string())
            .collect(),
            ideal_capacity: (6, 12),
            acceptable_capacity: (4, 15),
            ideal_score: 50.0,
            acceptable_score: 30.0,
            fallback_score: 10.0,
            mood_bonus: 40.0,
            saves: 8.0,
            hype_threshold: 500.0,
            hype_penalty: 0.7,
        }
    }
}

pub fn is_chill_eligible(event: &Event, config: &ChillConfig) -> bool {
    if event.has_mood("chill") {
        return true;
    }
    event.tags.iter().any(|tag| {
        config
            .keywords
            .iter()
            .any(|keyword| contains_ignore_ascii_case(tag, keyword))
    })
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

#[derive(Debug, Clone, Default)]
pub struct ChillScorer {
    config: ChillConfig,
}

impl ChillScorer {
    pub fn new(config: ChillConfig) -> Self {
        Self { config }
    }

    pub fn is_eligible(&self, event: &Event) -> bool {
        is_chill_eligible(event, &self.config)
    }

    pub fn capacity_score(&self, capacity: u64) -> f64 {
        let within = |(low, high): (u64, u64)| (low..=high).contains(&capacity);
        if within(self.config.ideal_capacity) {
            self.config.ideal_score
        } else if within(self.config.acceptable_capacity) {
            self.config.acceptable_score
        } else {
            self.config.fallback_score
        }
    }

    pub fn is_hyped(&self, event: &Event) -> bool {
        let metrics = &event.metrics;
        let hype = metrics.views_24h as f64 + metrics.shares_24h as f64 * 5.0;
        hype > self.config.hype_threshold
    }

    pub fn score(&self, event: &Event) -> f64 {
        let metrics = &event.metrics;
        let mut score = self.capacity_score(event.capacity);

        if event.has_mood("chill") {
            score += self.config.mood_bonus;
        }

        score += metrics.saves as f64 * self.config.saves;
        score += metrics.avg_view_ms as f64 / 1000.0;

        if self.is_hyped(event) {
            score *= self.config.hype_penalty;
        }

        score
    }
}
