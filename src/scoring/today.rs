use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Event, TodayWindow};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TodayConfig {
    pub likes: f64,
    pub saves: f64,
    /// Events starting within this many hours earn an urgency bonus.
    pub urgency_horizon_hours: f64,
    pub urgency_per_hour: f64,
}

impl Default for TodayConfig {
    fn default() -> Self {
        Self {
            likes: 2.0,
            saves: 5.0,
            urgency_horizon_hours: 24.0,
            urgency_per_hour: 2.0,
        }
    }
}

/// Signed hours elapsed from `from` to `to`.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

#[derive(Debug, Clone, Default)]
pub struct TodayScorer {
    config: TodayConfig,
}

impl TodayScorer {
    pub fn new(config: TodayConfig) -> Self {
        Self { config }
    }

    pub fn is_eligible(&self, event: &Event, window: &TodayWindow) -> bool {
        event
            .start_time
            .is_some_and(|start_time| window.contains(start_time))
    }

    /// Bonus for events starting soon. Events already started get nothing.
    pub fn urgency(&self, start_time: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let hours_until_start = hours_between(now, start_time);
        if (0.0..=self.config.urgency_horizon_hours).contains(&hours_until_start) {
            (self.config.urgency_horizon_hours - hours_until_start) * self.config.urgency_per_hour
        } else {
            0.0
        }
    }

    pub fn score(&self, event: &Event, now: DateTime<Utc>) -> f64 {
        let metrics = &event.metrics;
        let base = metrics.likes_24h as f64 * self.config.likes
            + metrics.saves as f64 * self.config.saves;
        match event.start_time {
            Some(start_time) => base + self.urgency(start_time, now),
            None => base,
        }
    }
}
