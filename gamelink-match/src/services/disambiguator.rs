//! Candidate selection for one library entry
//!
//! **Algorithm:**
//! 1. No candidates → `UNMATCHED`
//! 2. Drop candidates below `min_score_threshold`; none left → `UNMATCHED`
//!    with the best rejected candidates kept as alternates
//! 3. If the entry has a year, keep candidates within `year_tolerance`
//!    (candidates without a year stay). If nothing survives, fall back to
//!    the unfiltered set and lower the tier one step.
//! 4. Rank by score desc, year delta asc (unknown last), candidate id asc
//! 5. Top two tied on score and year delta → `AMBIGUOUS`, no selection
//! 6. Otherwise select the top: `EXACT` at 1.0, `HIGH` at or above
//!    `high_score_threshold`, else `LOW`

use crate::config::MatchConfig;
use crate::types::{ConfidenceTier, LibraryEntry, MatchResult, ScoredCandidate, Source};
use std::cmp::Ordering;

/// Pick the match for `entry` among candidates already scored against it
pub fn disambiguate(
    entry: &LibraryEntry,
    source: Source,
    scored: Vec<ScoredCandidate>,
    config: &MatchConfig,
) -> MatchResult {
    if scored.is_empty() {
        return MatchResult::unmatched(entry, source, None, Vec::new());
    }

    let top_score = scored
        .iter()
        .map(|c| c.similarity_score)
        .fold(f64::MIN, f64::max);

    let (mut passing, mut rejected): (Vec<_>, Vec<_>) = scored
        .into_iter()
        .partition(|c| c.similarity_score >= config.min_score_threshold);

    if passing.is_empty() {
        rejected.sort_by(rank_order);
        rejected.truncate(config.max_alternates);
        tracing::debug!(
            entry = %entry.id,
            source = %source,
            top_score,
            "No candidate above minimum threshold"
        );
        return MatchResult::unmatched(entry, source, Some(top_score), rejected);
    }

    let mut year_fallback = false;
    if entry.release_year.is_some() {
        let (within, outside): (Vec<_>, Vec<_>) = passing
            .into_iter()
            .partition(|c| c.year_delta.map_or(true, |d| d <= config.year_tolerance));

        if within.is_empty() {
            tracing::debug!(
                entry = %entry.id,
                source = %source,
                year = ?entry.release_year,
                "Year filter removed every candidate, falling back"
            );
            year_fallback = true;
            passing = outside;
        } else {
            passing = within;
        }
    }

    passing.sort_by(rank_order);

    let tied = passing
        .iter()
        .take_while(|c| is_tie(c, &passing[0]))
        .count();

    if tied >= 2 {
        let keep = tied.min(config.max_alternates).max(2);
        passing.truncate(keep);
        return MatchResult::ambiguous(entry, source, top_score, passing)
            .with_year_fallback(year_fallback);
    }

    let selected = passing.remove(0);
    let mut tier = if selected.similarity_score >= 1.0 {
        ConfidenceTier::Exact
    } else if selected.similarity_score >= config.high_score_threshold {
        ConfidenceTier::High
    } else {
        ConfidenceTier::Low
    };
    if year_fallback {
        tier = tier.lowered();
    }

    passing.truncate(config.max_alternates);

    MatchResult::matched(entry, source, tier, selected, top_score, passing)
        .with_year_fallback(year_fallback)
}

/// Ranking: score desc, year delta asc with unknown last, id asc
pub fn rank_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.similarity_score
        .total_cmp(&a.similarity_score)
        .then_with(|| match (a.year_delta, b.year_delta) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.candidate_id().cmp(b.candidate_id()))
}

fn is_tie(a: &ScoredCandidate, b: &ScoredCandidate) -> bool {
    a.similarity_score == b.similarity_score && a.year_delta == b.year_delta
}
