use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredCandidate<'a> {
    pub id: &'a str,
    pub score: f64,
}

impl<'a> ScoredCandidate<'a> {
    pub fn new(id: &'a str, score: f64) -> Self {
        Self { id, score }
    }
}

/// Orders scored candidates for a single feed.
///
/// Non-finite scores are dropped, the sort is stable and descending so ties
/// keep arrival order, and a repeated id keeps only its best-ranked entry.
pub fn order(mut candidates: Vec<ScoredCandidate<'_>>) -> Vec<ScoredCandidate<'_>> {
    candidates.retain(|candidate| candidate.score.is_finite());
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut seen = HashSet::with_capacity(candidates.len());
    candidates.retain(|candidate| seen.insert(candidate.id));
    candidates
}
