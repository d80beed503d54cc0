use chrono::{DateTime, Duration, TimeZone, Utc};
use feed_ranker::scoring::{
    hours_between, order, recency, save_boost, social, tag_affinity, velocity, view_time_ratio,
    ChillConfig, ChillScorer, PersonalConfig, PersonalScorer, PriceScorer, PriceTier,
    PricingConfig, ScoredCandidate, TodayScorer, TrendingConfig, TrendingScorer,
};
use feed_ranker::{Event, Metrics, Post, UserProfile};

fn pinned_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()
}

fn metrics(views: u64, likes: u64, shares: u64, saves: u64) -> Metrics {
    Metrics {
        views_24h: views,
        likes_24h: likes,
        shares_24h: shares,
        saves,
        ..Metrics::default()
    }
}

fn user_with_tags(tags: &[(&str, f64)]) -> UserProfile {
    UserProfile {
        id: "u1".to_string(),
        preferred_tags: tags
            .iter()
            .map(|(tag, weight)| (tag.to_string(), *weight))
            .collect(),
        ..UserProfile::default()
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn velocity_weights_shares_highest() {
    let config = TrendingConfig::default();
    let score = velocity(&metrics(100, 10, 2, 0), &config);
    assert!((score - (30.0 + 50.0 + 20.0)).abs() < 1e-6);
    assert!((save_boost(&metrics(0, 0, 0, 7), &config) - 21.0).abs() < 1e-6);
}

#[test]
fn recency_decays_to_inverse_e_after_two_days() {
    let now = pinned_now();
    assert!((recency(Some(now), now, 48.0) - 1.0).abs() < 1e-9);

    let two_days = recency(Some(now - Duration::hours(48)), now, 48.0);
    assert!((two_days - (-1.0_f64).exp()).abs() < 1e-9);

    assert_eq!(recency(None, now, 48.0), 0.0);
}

#[test]
fn trending_score_applies_recency_to_velocity_plus_saves() {
    let now = pinned_now();
    let scorer = TrendingScorer::new(TrendingConfig::default());
    let event = Event {
        id: "e1".to_string(),
        created_at: Some(now - Duration::hours(12)),
        metrics: metrics(3000, 150, 30, 15),
        ..Event::default()
    };

    let expected = (900.0 + 750.0 + 300.0 + 45.0) * (-0.25_f64).exp();
    assert!((scorer.score(&event, now) - expected).abs() < 1e-6);
}

#[test]
fn tag_affinity_is_case_insensitive_and_ignores_unknown_tags() {
    let user = user_with_tags(&[("tech", 1.5), ("ai", 0.5)]);
    let score = tag_affinity(&tags(&["Tech", "AI", "food"]), &user);
    assert!((score - 2.0).abs() < 1e-9);
}

#[test]
fn view_time_ratio_clamps_zero_baseline() {
    let user = UserProfile {
        id: "u1".to_string(),
        avg_view_time_ms: 0,
        ..UserProfile::default()
    };
    let content = Metrics {
        avg_view_ms: 2_000,
        ..Metrics::default()
    };

    let ratio = view_time_ratio(&content, &user);
    assert!(ratio.is_finite());
    assert!((ratio - 2_000.0).abs() < 1e-9);

    assert_eq!(view_time_ratio(&Metrics::default(), &user), 0.0);
}

#[test]
fn view_time_ratio_only_counts_longer_dwell() {
    let user = UserProfile {
        id: "u1".to_string(),
        avg_view_time_ms: 30_000,
        ..UserProfile::default()
    };
    let shorter = Metrics {
        avg_view_ms: 30_000,
        ..Metrics::default()
    };
    let longer = Metrics {
        avg_view_ms: 60_000,
        ..Metrics::default()
    };

    assert_eq!(view_time_ratio(&shorter, &user), 0.0);
    assert!((view_time_ratio(&longer, &user) - 2.0).abs() < 1e-9);
}

#[test]
fn personal_score_sums_every_signal() {
    let mut user = user_with_tags(&[("tech", 1.5)]);
    user.followed_authors.insert("author1".to_string());
    user.avg_view_time_ms = 30_000;

    let post = Post {
        id: "p1".to_string(),
        author_id: Some("author1".to_string()),
        tags: tags(&["tech", "programming"]),
        metrics: Metrics {
            likes_24h: 50,
            shares_24h: 1,
            saves: 10,
            avg_view_ms: 60_000,
            ..Metrics::default()
        },
        ..Post::default()
    };

    let scorer = PersonalScorer::new(PersonalConfig::default());
    let expected = 15.0 + 100.0 + 50.0 + 6.0 + 100.0 + 4.0;
    assert!((scorer.score(&post, &user) - expected).abs() < 1e-9);
    assert!((social(&post.metrics, &PersonalConfig::default()) - 104.0).abs() < 1e-9);
}

#[test]
fn missing_author_never_matches_follow_list() {
    let mut user = user_with_tags(&[]);
    user.followed_authors.insert(String::new());

    let post = Post {
        id: "p1".to_string(),
        author_id: None,
        ..Post::default()
    };

    let scorer = PersonalScorer::new(PersonalConfig::default());
    assert_eq!(scorer.score(&post, &user), 0.0);
}

#[test]
fn mood_bonus_scales_event_personal_score() {
    let user = user_with_tags(&[("chill", 1.0)]);
    let event = Event {
        id: "e1".to_string(),
        mood: Some("Chill".to_string()),
        metrics: metrics(0, 10, 0, 0),
        ..Event::default()
    };
    let moodless = Event {
        mood: None,
        ..event.clone()
    };

    let scorer = PersonalScorer::new(PersonalConfig::default());
    assert!((scorer.score_event(&event, &user) - 24.0).abs() < 1e-9);
    assert!((scorer.score_event(&moodless, &user) - 20.0).abs() < 1e-9);
}

#[test]
fn chill_score_bands_capacity_and_penalises_hype() {
    let scorer = ChillScorer::new(ChillConfig::default());
    assert_eq!(scorer.capacity_score(6), 50.0);
    assert_eq!(scorer.capacity_score(12), 50.0);
    assert_eq!(scorer.capacity_score(4), 30.0);
    assert_eq!(scorer.capacity_score(15), 30.0);
    assert_eq!(scorer.capacity_score(3), 10.0);
    assert_eq!(scorer.capacity_score(16), 10.0);

    let calm = Event {
        id: "e1".to_string(),
        mood: Some("chill".to_string()),
        capacity: 10,
        metrics: Metrics {
            views_24h: 100,
            saves: 20,
            avg_view_ms: 5_000,
            ..Metrics::default()
        },
        ..Event::default()
    };
    assert!((scorer.score(&calm) - (50.0 + 40.0 + 160.0 + 5.0)).abs() < 1e-9);

    let hyped = Event {
        metrics: Metrics {
            views_24h: 400,
            shares_24h: 21,
            saves: 20,
            avg_view_ms: 5_000,
            ..Metrics::default()
        },
        ..calm.clone()
    };
    assert!(scorer.is_hyped(&hyped));
    assert!((scorer.score(&hyped) - 255.0 * 0.7).abs() < 1e-9);
}

#[test]
fn chill_eligibility_matches_mood_or_keyword_substring() {
    let config = ChillConfig::default();
    let by_mood = Event {
        mood: Some("CHILL".to_string()),
        ..Event::default()
    };
    let by_tag = Event {
        tags: tags(&["Sunday-Coffee-Club"]),
        ..Event::default()
    };
    let neither = Event {
        mood: Some("hype".to_string()),
        tags: tags(&["party", "dance"]),
        ..Event::default()
    };

    assert!(feed_ranker::scoring::is_chill_eligible(&by_mood, &config));
    assert!(feed_ranker::scoring::is_chill_eligible(&by_tag, &config));
    assert!(!feed_ranker::scoring::is_chill_eligible(&neither, &config));
}

#[test]
fn chill_keywords_match_inside_mixed_case_and_non_ascii_tags() {
    let config = ChillConfig::default();
    let lounge = Event {
        tags: tags(&["Café-LOUNGE"]),
        ..Event::default()
    };
    let unrelated = Event {
        tags: tags(&["Über-Party", ""]),
        ..Event::default()
    };

    assert!(feed_ranker::scoring::is_chill_eligible(&lounge, &config));
    assert!(!feed_ranker::scoring::is_chill_eligible(&unrelated, &config));
}

#[test]
fn urgency_rewards_events_starting_soon_only() {
    let now = pinned_now();
    let scorer = TodayScorer::default();

    assert!((scorer.urgency(now + Duration::hours(4), now) - 40.0).abs() < 1e-9);
    assert!((scorer.urgency(now, now) - 48.0).abs() < 1e-9);
    assert_eq!(scorer.urgency(now - Duration::hours(2), now), 0.0);
    assert_eq!(scorer.urgency(now + Duration::hours(30), now), 0.0);
    assert!((hours_between(now, now + Duration::minutes(90)) - 1.5).abs() < 1e-9);
}

#[test]
fn price_scorer_weights_saves_by_tier() {
    let scorer = PriceScorer::new(PricingConfig::default());
    let free = Event {
        metrics: metrics(10, 2, 1, 3),
        ..Event::default()
    };
    let paid = Event {
        price_cents: 50_000,
        ..free.clone()
    };

    assert!((scorer.score(&free, PriceTier::Free) - (5.0 + 6.0 + 5.0 + 12.0)).abs() < 1e-9);
    let expected_paid = 5.0 + 6.0 + 5.0 + 18.0 + 0.5 * (50_001.0_f64).ln();
    assert!((scorer.score(&paid, PriceTier::Paid) - expected_paid).abs() < 1e-9);
    assert_eq!(PriceTier::of(&free), PriceTier::Free);
    assert_eq!(PriceTier::of(&paid), PriceTier::Paid);
}

#[test]
fn order_is_stable_drops_non_finite_and_dedups() {
    let ordered = order(vec![
        ScoredCandidate::new("a", 1.0),
        ScoredCandidate::new("b", f64::NAN),
        ScoredCandidate::new("c", 3.0),
        ScoredCandidate::new("d", 1.0),
        ScoredCandidate::new("e", f64::INFINITY),
        ScoredCandidate::new("a", 0.5),
    ]);

    let ids: Vec<&str> = ordered.iter().map(|candidate| candidate.id).collect();
    assert_eq!(ids, vec!["c", "a", "d"]);
}
