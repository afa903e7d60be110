//! Match quality reports
//!
//! Pure aggregation over a finished result set: tier counts, the review
//! list, and a few breakdowns that point at data-quality problems.

use crate::config::MatchConfig;
use crate::types::{ConfidenceTier, MatchResult, RawAttributes, ScoredCandidate, Source};
use serde::Serialize;
use std::collections::BTreeMap;

/// One result that needs a human to look at it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewItem {
    pub library_id: String,
    pub library_title: String,
    pub confidence_tier: ConfidenceTier,
    pub top_score: Option<f64>,
    /// Selected candidate id for `LOW` (or other matched tiers under review)
    pub selected_id: Option<String>,
    pub alternates: Vec<ScoredCandidate>,
    pub year_fallback: bool,
    pub failure: Option<String>,
}

impl ReviewItem {
    fn from_result(result: &MatchResult, max_alternates: usize) -> Self {
        Self {
            library_id: result.library_id.clone(),
            library_title: result.library_title.clone(),
            confidence_tier: result.confidence_tier,
            top_score: result.top_score,
            selected_id: result.selected_id().map(str::to_string),
            alternates: result.alternates.iter().take(max_alternates).cloned().collect(),
            year_fallback: result.year_fallback,
            failure: result.failure.clone(),
        }
    }
}

/// Aggregate over all results for one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub source: Source,
    pub total: usize,
    /// Every tier appears, zero when unused
    pub tier_counts: BTreeMap<ConfidenceTier, usize>,
    /// Sorted by library title, then library id
    pub review: Vec<ReviewItem>,
    /// Matches whose year filter fell back to the unfiltered set
    pub year_fallbacks: usize,
    /// Selected IGDB candidates that are not main games, by category name
    pub non_main_games: BTreeMap<String, usize>,
    /// Malformed candidates dropped across the source
    pub dropped_candidates: usize,
}

impl MatchReport {
    pub fn count(&self, tier: ConfidenceTier) -> usize {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }

    /// Results with a selected candidate
    pub fn matched(&self) -> usize {
        ConfidenceTier::ALL
            .iter()
            .filter(|t| t.is_matched())
            .map(|t| self.count(*t))
            .sum()
    }

    /// Share of results that are `EXACT`, `HIGH` or `LOW` (0.0 when empty)
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.matched() as f64 / self.total as f64
    }

    /// Write a human-readable summary through tracing
    pub fn log_summary(&self) {
        tracing::info!(
            source = %self.source,
            total = self.total,
            matched = self.matched(),
            match_rate = self.match_rate(),
            "Match report"
        );

        for tier in ConfidenceTier::ALL {
            tracing::info!(source = %self.source, tier = %tier, count = self.count(tier), "Tier count");
        }

        if self.year_fallbacks > 0 {
            tracing::info!(
                source = %self.source,
                count = self.year_fallbacks,
                "Matches selected despite release-year mismatch"
            );
        }

        for (category, count) in &self.non_main_games {
            tracing::info!(source = %self.source, category = %category, count, "Non-main-game matches");
        }

        if self.dropped_candidates > 0 {
            tracing::warn!(
                source = %self.source,
                count = self.dropped_candidates,
                "Malformed candidates dropped"
            );
        }

        for item in &self.review {
            match &item.failure {
                Some(reason) => tracing::warn!(
                    source = %self.source,
                    id = %item.library_id,
                    title = %item.library_title,
                    reason = %reason,
                    "Needs review: lookup failed"
                ),
                None => tracing::info!(
                    source = %self.source,
                    id = %item.library_id,
                    title = %item.library_title,
                    tier = %item.confidence_tier,
                    top_score = ?item.top_score,
                    alternates = item.alternates.len(),
                    "Needs review"
                ),
            }
        }
    }
}

/// Build the report for `source` from `results`
///
/// Results for other sources are ignored.
pub fn build_report(source: Source, results: &[MatchResult], config: &MatchConfig) -> MatchReport {
    let mut tier_counts: BTreeMap<ConfidenceTier, usize> =
        ConfidenceTier::ALL.iter().map(|t| (*t, 0)).collect();
    let mut review = Vec::new();
    let mut year_fallbacks = 0;
    let mut non_main_games: BTreeMap<String, usize> = BTreeMap::new();
    let mut dropped_candidates = 0;
    let mut total = 0;

    for result in results.iter().filter(|r| r.source == source) {
        total += 1;
        *tier_counts.entry(result.confidence_tier).or_insert(0) += 1;
        dropped_candidates += result.dropped_candidates;

        if result.year_fallback {
            year_fallbacks += 1;
        }

        if let Some(selected) = &result.selected_candidate {
            if let RawAttributes::Igdb(attrs) = &selected.candidate.raw_attributes {
                if let Some(category) = attrs.category.filter(|c| !c.is_main_game()) {
                    *non_main_games.entry(category.name()).or_insert(0) += 1;
                }
            }
        }

        if config.needs_review(result.confidence_tier) {
            review.push(ReviewItem::from_result(result, config.max_alternates));
        }
    }

    review.sort_by(|a, b| {
        a.library_title
            .cmp(&b.library_title)
            .then_with(|| a.library_id.cmp(&b.library_id))
    });

    MatchReport {
        source,
        total,
        tier_counts,
        review,
        year_fallbacks,
        non_main_games,
        dropped_candidates,
    }
}

/// One report per requested source, including sources with no results
pub fn build_reports(
    sources: &[Source],
    results: &[MatchResult],
    config: &MatchConfig,
) -> BTreeMap<Source, MatchReport> {
    sources
        .iter()
        .map(|source| (*source, build_report(*source, results, config)))
        .collect()
}
