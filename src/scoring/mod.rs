pub mod chill;
pub mod engagement;
pub mod personal;
pub mod pipeline;
pub mod price;
pub mod today;

pub use chill::{is_chill_eligible, ChillConfig, ChillScorer};
pub use engagement::{recency, save_boost, velocity, TrendingConfig, TrendingScorer};
pub use personal::{social, tag_affinity, view_time_ratio, PersonalConfig, PersonalScorer};
pub use pipeline::{order, ScoredCandidate};
pub use price::{PricingConfig, PriceScorer, PriceTier};
pub use today::{hours_between, TodayConfig, TodayScorer};
