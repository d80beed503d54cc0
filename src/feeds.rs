use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::RankingConfig;
use crate::filter::Candidate;
use crate::model::{Event, Post, TodayWindow, UserProfile};
use crate::scoring::{
    order, ChillScorer, PersonalScorer, PriceScorer, PriceTier, ScoredCandidate, TodayScorer,
    TrendingScorer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    Trending,
    ForYouPosts,
    ForYouEvents,
    Chill,
    Today,
    Free,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Events,
    Posts,
}

impl Feed {
    pub const ALL: [Feed; 7] = [
        Feed::Trending,
        Feed::ForYouPosts,
        Feed::ForYouEvents,
        Feed::Chill,
        Feed::Today,
        Feed::Free,
        Feed::Paid,
    ];

    /// Response key for this feed.
    pub fn key(self) -> &'static str {
        match self {
            Feed::Trending => "trending_event",
            Feed::ForYouPosts => "for_you_posts",
            Feed::ForYouEvents => "for_you_events",
            Feed::Chill => "chill_events",
            Feed::Today => "hari_ini_events",
            Feed::Free => "gratis_events",
            Feed::Paid => "bayar_events",
        }
    }

    pub fn pool(self) -> Pool {
        match self {
            Feed::ForYouPosts => Pool::Posts,
            _ => Pool::Events,
        }
    }
}

/// The scorer instances every feed draws on, built once from config.
#[derive(Debug, Clone, Default)]
pub struct ScorerSet {
    pub trending: TrendingScorer,
    pub personal: PersonalScorer,
    pub chill: ChillScorer,
    pub today: TodayScorer,
    pub price: PriceScorer,
}

impl ScorerSet {
    pub fn from_config(config: &RankingConfig) -> Self {
        Self {
            trending: TrendingScorer::new(config.trending.clone()),
            personal: PersonalScorer::new(config.personal.clone()),
            chill: ChillScorer::new(config.chill.clone()),
            today: TodayScorer::new(config.today.clone()),
            price: PriceScorer::new(config.pricing.clone()),
        }
    }
}

/// Everything a scorer may read besides the candidate itself.
#[derive(Debug, Clone, Copy)]
pub struct FeedContext<'a> {
    pub scorers: &'a ScorerSet,
    pub user: &'a UserProfile,
    pub now: DateTime<Utc>,
    pub window: TodayWindow,
}

/// One row of the feed table: eligibility predicate plus score function.
pub struct FeedScorer<T> {
    pub feed: Feed,
    pub eligible: fn(&FeedContext<'_>, &T) -> bool,
    pub score: fn(&FeedContext<'_>, &T) -> f64,
}

impl<T: Candidate> FeedScorer<T> {
    pub fn rank<'a>(&self, ctx: &FeedContext<'_>, pool: &[&'a T]) -> Vec<ScoredCandidate<'a>> {
        let scored = pool
            .iter()
            .copied()
            .filter(|candidate| (self.eligible)(ctx, *candidate))
            .map(|candidate| ScoredCandidate::new(candidate.id(), (self.score)(ctx, candidate)))
            .collect();
        order(scored)
    }
}

fn always<T>(_: &FeedContext<'_>, _: &T) -> bool {
    true
}

pub const EVENT_FEEDS: [FeedScorer<Event>; 6] = [
    FeedScorer {
        feed: Feed::Trending,
        eligible: always,
        score: |ctx, event| ctx.scorers.trending.score(event, ctx.now),
    },
    FeedScorer {
        feed: Feed::ForYouEvents,
        eligible: always,
        score: |ctx, event| ctx.scorers.personal.score_event(event, ctx.user),
    },
    FeedScorer {
        feed: Feed::Chill,
        eligible: |ctx, event| ctx.scorers.chill.is_eligible(event),
        score: |ctx, event| ctx.scorers.chill.score(event),
    },
    FeedScorer {
        feed: Feed::Today,
        eligible: |ctx, event| ctx.scorers.today.is_eligible(event, &ctx.window),
        score: |ctx, event| ctx.scorers.today.score(event, ctx.now),
    },
    FeedScorer {
        feed: Feed::Free,
        eligible: |_, event| PriceTier::of(event) == PriceTier::Free,
        score: |ctx, event| ctx.scorers.price.score(event, PriceTier::Free),
    },
    FeedScorer {
        feed: Feed::Paid,
        eligible: |_, event| PriceTier::of(event) == PriceTier::Paid,
        score: |ctx, event| ctx.scorers.price.score(event, PriceTier::Paid),
    },
];

pub const POST_FEEDS: [FeedScorer<Post>; 1] = [FeedScorer {
    feed: Feed::ForYouPosts,
    eligible: always,
    score: |ctx, post| ctx.scorers.personal.score(post, ctx.user),
}];
