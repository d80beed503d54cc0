use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::RankError;
use crate::feeds::Feed;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingRequest {
    pub user_profile: UserProfile,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contents: Contents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_window: Option<TodayWindow>,
}

impl RankingRequest {
    pub fn validate(&self) -> Result<(), RankError> {
        if self.user_profile.id.trim().is_empty() {
            return Err(RankError::InvalidRequest {
                field: "user_profile.id",
                reason: "is required",
            });
        }
        Ok(())
    }
}

/// The ranking "query": who the feeds are being built for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    /// Lower-cased tag to affinity weight.
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferred_tags: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_contents: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followed_authors: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_view_time_ms: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skip_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezone: String,
}

impl UserProfile {
    pub fn follows(&self, author_id: Option<&str>) -> bool {
        author_id.is_some_and(|author| self.followed_authors.contains(author))
    }

    pub fn tag_weight(&self, tag: &str) -> Option<f64> {
        if tag.chars().any(char::is_uppercase) {
            self.preferred_tags.get(&tag.to_lowercase()).copied()
        } else {
            self.preferred_tags.get(tag).copied()
        }
    }

    /// View-time baseline in milliseconds, never below 1.
    pub fn view_time_baseline(&self) -> f64 {
        self.avg_view_time_ms.max(1) as f64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contents {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub events: Vec<Event>,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_cents: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capacity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: Metrics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visibility: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Event {
    /// The event mood, if one is set and non-empty.
    pub fn mood(&self) -> Option<&str> {
        self.mood.as_deref().filter(|mood| !mood.is_empty())
    }

    pub fn has_mood(&self, expected: &str) -> bool {
        self.mood()
            .is_some_and(|mood| mood.eq_ignore_ascii_case(expected))
    }

    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: Metrics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visibility: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
}

/// Engagement counters attached to every candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    #[serde(deserialize_with = "null_as_default")]
    pub views_24h: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub likes_24h: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub shares_24h: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub saves: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub avg_view_ms: u64,
}

/// The user's local "today" expressed in UTC. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayWindow {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
}

impl TodayWindow {
    /// The UTC calendar day containing `now`.
    pub fn utc_day(now: DateTime<Utc>) -> Self {
        let midnight = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN));
        Self {
            start_utc: midnight,
            end_utc: midnight + Duration::days(1),
        }
    }

    pub fn resolve(window: Option<TodayWindow>, now: DateTime<Utc>) -> Self {
        window.unwrap_or_else(|| Self::utc_day(now))
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_utc && instant <= self.end_utc
    }
}

/// Seven independently ordered feeds of content IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingResponse {
    #[serde(default)]
    pub trending_event: Vec<String>,
    #[serde(default)]
    pub for_you_posts: Vec<String>,
    #[serde(default)]
    pub for_you_events: Vec<String>,
    #[serde(default)]
    pub chill_events: Vec<String>,
    #[serde(default)]
    pub hari_ini_events: Vec<String>,
    #[serde(default)]
    pub gratis_events: Vec<String>,
    #[serde(default)]
    pub bayar_events: Vec<String>,
}

impl RankingResponse {
    pub fn feed(&self, feed: Feed) -> &[String] {
        match feed {
            Feed::Trending => &self.trending_event,
            Feed::ForYouPosts => &self.for_you_posts,
            Feed::ForYouEvents => &self.for_you_events,
            Feed::Chill => &self.chill_events,
            Feed::Today => &self.hari_ini_events,
            Feed::Free => &self.gratis_events,
            Feed::Paid => &self.bayar_events,
        }
    }

    pub fn feed_mut(&mut self, feed: Feed) -> &mut Vec<String> {
        match feed {
            Feed::Trending => &mut self.trending_event,
            Feed::ForYouPosts => &mut self.for_you_posts,
            Feed::ForYouEvents => &mut self.for_you_events,
            Feed::Chill => &mut self.chill_events,
            Feed::Today => &mut self.hari_ini_events,
            Feed::Free => &mut self.gratis_events,
            Feed::Paid => &mut self.bayar_events,
        }
    }
}

/// Treats an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Keeps the candidates that parse and drops the rest, so one bad entry
/// never rejects the whole pool.
fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Vec<serde_json::Value> = null_as_default(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}
