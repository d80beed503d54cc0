use serde::{Deserialize, Serialize};

use crate::model::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    Free,
    Paid,
}

impl PriceTier {
    pub fn of(event: &Event) -> Self {
        if event.is_free() {
            PriceTier::Free
        } else {
            PriceTier::Paid
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub views: f64,
    pub likes: f64,
    pub shares: f64,
    pub free_saves: f64,
    /// Saving a paid event is a stronger purchase-intent signal.
    pub paid_saves: f64,
    pub price_log: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            views: 0.5,
            likes: 3.0,
            shares: 5.0,
            free_saves: 4.0,
            paid_saves: 6.0,
            price_log: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PriceScorer {
    config: PricingConfig,
}

impl PriceScorer {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, event: &Event, tier: PriceTier) -> f64 {
        let metrics = &event.metrics;
        let engagement = metrics.views_24h as f64 * self.config.views
            + metrics.likes_24h as f64 * self.config.likes
            + metrics.shares_24h as f64 * self.config.shares;

        match tier {
            PriceTier::Free => engagement + metrics.saves as f64 * self.config.free_saves,
            PriceTier::Paid => {
                let premium = (event.price_cents as f64 + 1.0).ln() * self.config.price_log;
                engagement + metrics.saves as f64 * self.config.paid_saves + premium
            }
        }
    }
}
