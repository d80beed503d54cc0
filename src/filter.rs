use chrono::{DateTime, Utc};

use crate::model::{Event, Metrics, Post};

/// Common view over events and posts used by the filter and shared scorers.
pub trait Candidate {
    fn id(&self) -> &str;
    fn visibility(&self) -> &str;
    fn status(&self) -> &str;
    fn tags(&self) -> &[String];
    fn metrics(&self) -> &Metrics;
    fn author_id(&self) -> Option<&str>;
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

impl Candidate for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn visibility(&self) -> &str {
        &self.visibility
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn author_id(&self) -> Option<&str> {
        self.author_id.as_deref().filter(|id| !id.is_empty())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Candidate for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn visibility(&self) -> &str {
        &self.visibility
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn author_id(&self) -> Option<&str> {
        self.author_id.as_deref().filter(|id| !id.is_empty())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

pub fn is_visible<T: Candidate + ?Sized>(candidate: &T) -> bool {
    candidate.visibility().eq_ignore_ascii_case("public")
        && candidate.status().eq_ignore_ascii_case("published")
}

/// Keeps public + published candidates, preserving input order.
pub fn visible<'a, T, I>(candidates: I) -> Vec<&'a T>
where
    T: Candidate + 'a,
    I: IntoIterator<Item = &'a T>,
{
    candidates
        .into_iter()
        .filter(|candidate| is_visible(*candidate))
        .collect()
}
