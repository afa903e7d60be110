//! Matching services
//!
//! Pure building blocks used by the resolution engine: title
//! normalization, similarity scoring, candidate selection and reporting.

pub mod disambiguator;
pub mod normalizer;
pub mod report_builder;
pub mod similarity;

pub use disambiguator::{disambiguate, rank_order};
pub use normalizer::{normalize, Normalizer, DEFAULT_EDITION_SUFFIXES};
pub use report_builder::{build_report, build_reports, MatchReport, ReviewItem};
pub use similarity::{score, score_titles, INEXACT_CEILING};
