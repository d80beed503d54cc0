use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Contents, Event, Metrics, Post, RankingRequest, TodayWindow, UserProfile};

const TAGS: [&str; 16] = [
    "tech", "music", "coffee", "food", "art", "relax", "party", "sports", "hangout", "lounge",
    "ai", "dance", "books", "calm", "startup", "travel",
];
const MOODS: [&str; 5] = ["chill", "hype", "calm", "social", "focus"];
const VISIBILITIES: [&str; 4] = ["public", "public", "private", "followers"];
const STATUSES: [&str; 4] = ["published", "published", "draft", "cancelled"];
const AUTHOR_COUNT: u32 = 40;

#[derive(Debug, Clone)]
pub struct SyntheticOptions {
    pub seed: u64,
    pub events: usize,
    pub posts: usize,
}

impl Default for SyntheticOptions {
    fn default() -> Self {
        Self {
            seed: 7,
            events: 50,
            posts: 50,
        }
    }
}

/// Builds a reproducible ranking request; the same options and `now` always give the same request.
pub fn generate_request(options: &SyntheticOptions, now: DateTime<Utc>) -> RankingRequest {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let user_profile = sample_user(&mut rng);

    let events = (0..options.events)
        .map(|idx| sample_event(&mut rng, idx, now))
        .collect();
    let posts = (0..options.posts)
        .map(|idx| sample_post(&mut rng, idx, now))
        .collect();

    RankingRequest {
        user_profile,
        contents: Contents { events, posts },
        today_window: Some(TodayWindow::utc_day(now)),
    }
}

fn sample_user(rng: &mut StdRng) -> UserProfile {
    let mut preferred_tags = BTreeMap::new();
    for tag in TAGS.choose_multiple(rng, 4) {
        let weight = (rng.gen_range(0.2..2.0) * 100.0_f64).round() / 100.0;
        preferred_tags.insert(tag.to_string(), weight);
    }

    let followed_authors: BTreeSet<String> = (0..5)
        .map(|_| author_id(rng.gen_range(0..AUTHOR_COUNT)))
        .collect();

    UserProfile {
        id: format!("user_{}", rng.gen_range(1000..10_000)),
        preferred_tags,
        liked_contents: BTreeSet::new(),
        followed_authors,
        avg_view_time_ms: rng.gen_range(5_000..60_000),
        skip_rate: (rng.gen::<f64>() * 100.0).round() / 100.0,
        location: None,
        timezone: "UTC".to_string(),
    }
}

fn sample_event(rng: &mut StdRng, idx: usize, now: DateTime<Utc>) -> Event {
    let hyped = rng.gen::<f64>() < 0.2;
    let price_cents = if rng.gen::<f64>() < 0.4 {
        0
    } else {
        rng.gen_range(1..200) * 500
    };

    Event {
        id: format!("event_{}", idx),
        title: format!("Synthetic event {}", idx),
        description: String::new(),
        created_at: Some(now - Duration::minutes(rng.gen_range(0..7 * 24 * 60))),
        start_time: Some(now + Duration::minutes(rng.gen_range(-24 * 60..3 * 24 * 60))),
        city: None,
        price_cents,
        capacity: rng.gen_range(2..300),
        mood: MOODS.choose(rng).map(|mood| mood.to_string()),
        tags: sample_tags(rng),
        metrics: sample_metrics(rng, hyped),
        visibility: pick(rng, &VISIBILITIES),
        status: pick(rng, &STATUSES),
        author_id: Some(author_id(rng.gen_range(0..AUTHOR_COUNT))),
        location: None,
    }
}

fn sample_post(rng: &mut StdRng, idx: usize, now: DateTime<Utc>) -> Post {
    let hyped = rng.gen::<f64>() < 0.1;
    Post {
        id: format!("post_{}", idx),
        caption: format!("Synthetic post {}", idx),
        created_at: Some(now - Duration::minutes(rng.gen_range(0..3 * 24 * 60))),
        tags: sample_tags(rng),
        metrics: sample_metrics(rng, hyped),
        visibility: pick(rng, &VISIBILITIES),
        status: pick(rng, &STATUSES[..3]),
        author_id: Some(author_id(rng.gen_range(0..AUTHOR_COUNT))),
    }
}

fn sample_tags(rng: &mut StdRng) -> Vec<String> {
    let count = rng.gen_range(0..4);
    TAGS.choose_multiple(rng, count)
        .map(|tag| tag.to_string())
        .collect()
}

fn sample_metrics(rng: &mut StdRng, hyped: bool) -> Metrics {
    let scale = if hyped { 20 } else { 1 };
    Metrics {
        views_24h: rng.gen_range(0..400) * scale,
        likes_24h: rng.gen_range(0..60) * scale,
        shares_24h: rng.gen_range(0..15) * scale,
        saves: rng.gen_range(0..30),
        comments: rng.gen_range(0..20),
        avg_view_ms: rng.gen_range(1_000..120_000),
    }
}

fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values
        .choose(rng)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

fn author_id(idx: u32) -> String {
    format!("author_{}", idx)
}
