use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::RankingConfig;
use crate::error::RankError;
use crate::feeds::{Feed, FeedContext, ScorerSet, EVENT_FEEDS, POST_FEEDS};
use crate::filter::visible;
use crate::model::{RankingRequest, RankingResponse, TodayWindow};
use crate::scoring::ScoredCandidate;

/// Per-feed scored output, kept for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedRanking<'a> {
    pub now: DateTime<Utc>,
    pub window: TodayWindow,
    pub feeds: BTreeMap<Feed, Vec<ScoredCandidate<'a>>>,
}

impl DetailedRanking<'_> {
    pub fn scores(&self, feed: Feed) -> &[ScoredCandidate<'_>] {
        self.feeds.get(&feed).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn into_response(self) -> RankingResponse {
        let mut response = RankingResponse::default();
        for (feed, scored) in self.feeds {
            *response.feed_mut(feed) = scored
                .into_iter()
                .map(|candidate| candidate.id.to_string())
                .collect();
        }
        response
    }
}

/// Builds all seven feeds for a request. Holds no per-request state.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    scorers: ScorerSet,
}

impl Ranker {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            scorers: ScorerSet::from_config(config),
        }
    }

    pub fn rank(&self, request: &RankingRequest) -> Result<RankingResponse, RankError> {
        self.rank_at(request, Utc::now())
    }

    /// Ranks against a pinned `now`; identical inputs give identical output.
    pub fn rank_at(
        &self,
        request: &RankingRequest,
        now: DateTime<Utc>,
    ) -> Result<RankingResponse, RankError> {
        Ok(self.rank_detailed(request, now)?.into_response())
    }

    pub fn rank_detailed<'a>(
        &self,
        request: &'a RankingRequest,
        now: DateTime<Utc>,
    ) -> Result<DetailedRanking<'a>, RankError> {
        request.validate()?;

        let window = TodayWindow::resolve(request.today_window, now);
        let ctx = FeedContext {
            scorers: &self.scorers,
            user: &request.user_profile,
            now,
            window,
        };

        let events = visible(&request.contents.events);
        let posts = visible(&request.contents.posts);

        let mut feeds = BTreeMap::new();
        for scorer in EVENT_FEEDS.iter() {
            feeds.insert(scorer.feed, scorer.rank(&ctx, &events));
        }
        for scorer in POST_FEEDS.iter() {
            feeds.insert(scorer.feed, scorer.rank(&ctx, &posts));
        }

        Ok(DetailedRanking { now, window, feeds })
    }
}
