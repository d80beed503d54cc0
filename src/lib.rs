pub mod api;
pub mod config;
pub mod error;
pub mod feeds;
pub mod filter;
pub mod model;
pub mod ranker;
pub mod scoring;
pub mod server;
pub mod synthetic;

pub use config::RankingConfig;
pub use error::RankError;
pub use feeds::{Feed, FeedScorer, EVENT_FEEDS, POST_FEEDS};
pub use filter::{is_visible, visible, Candidate};
pub use model::{
    Contents, Event, Location, Metrics, Post, RankingRequest, RankingResponse, TodayWindow,
    UserProfile,
};
pub use ranker::{DetailedRanking, Ranker};

/// Ranks a request with the default coefficients and the current time.
pub fn rank(request: &RankingRequest) -> Result<RankingResponse, RankError> {
    Ranker::default().rank(request)
}
