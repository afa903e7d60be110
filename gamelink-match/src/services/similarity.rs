//! Title similarity scoring
//!
//! Score is the larger of two views of the same pair:
//! - normalized Levenshtein over the whole string (typos, small edits)
//! - Sørensen–Dice over the token sets (reordered or extra words)
//!
//! Only identical strings score 1.0; anything else is capped at
//! [`INEXACT_CEILING`] so `EXACT` stays reserved for true equality.

use super::normalizer::Normalizer;
use std::collections::BTreeSet;

/// Upper bound for any pair of non-identical strings
pub const INEXACT_CEILING: f64 = 0.99;

/// Similarity of two already-normalized titles, in [0, 1]
///
/// Symmetric and deterministic.
pub fn score(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let sequence = strsim::normalized_levenshtein(a, b);
    let tokens = token_overlap(a, b);

    sequence.max(tokens).clamp(0.0, INEXACT_CEILING)
}

/// Normalize both raw titles with `normalizer`, then [`score`] them
pub fn score_titles(normalizer: &Normalizer, a: &str, b: &str) -> f64 {
    score(&normalizer.normalize(a), &normalizer.normalize(b))
}

/// Sørensen–Dice coefficient over whitespace-separated token sets
pub fn token_overlap(a: &str, b: &str) -> f64 {
    let left: BTreeSet<&str> = a.split_whitespace().collect();
    let right: BTreeSet<&str> = b.split_whitespace().collect();

    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let shared = left.intersection(&right).count();
    (2 * shared) as f64 / (left.len() + right.len()) as f64
}
