//! Core types for cross-catalog game matching
//!
//! Library entries flow in, candidates come back from the external
//! catalogs, and every `(entry, source)` pair ends up as exactly one
//! [`MatchResult`].

use crate::error::InputError;
use crate::services::normalizer::Normalizer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Sources and tiers
// ============================================================================

/// External catalog a candidate comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    /// Community playtime catalog (HowLongToBeat)
    #[serde(rename = "HLTB")]
    Hltb,
    /// Games metadata catalog (IGDB)
    #[serde(rename = "IGDB")]
    Igdb,
}

impl Source {
    /// Every supported source, in stable order
    pub const ALL: [Source; 2] = [Source::Hltb, Source::Igdb];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Hltb => "HLTB",
            Source::Igdb => "IGDB",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hltb" | "howlongtobeat" => Ok(Source::Hltb),
            "igdb" => Ok(Source::Igdb),
            other => Err(format!("unknown source '{}'", other)),
        }
    }
}

/// Confidence classification of one match outcome
///
/// Declaration order doubles as report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTier {
    /// Normalized titles are identical
    Exact,
    /// Score at or above the high threshold
    High,
    /// Score between the minimum and high thresholds
    Low,
    /// Two or more candidates tie for the top spot
    Ambiguous,
    /// No candidate cleared the minimum threshold
    Unmatched,
    /// The catalog could not be queried
    LookupFailed,
}

impl ConfidenceTier {
    pub const ALL: [ConfidenceTier; 6] = [
        ConfidenceTier::Exact,
        ConfidenceTier::High,
        ConfidenceTier::Low,
        ConfidenceTier::Ambiguous,
        ConfidenceTier::Unmatched,
        ConfidenceTier::LookupFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Exact => "EXACT",
            ConfidenceTier::High => "HIGH",
            ConfidenceTier::Low => "LOW",
            ConfidenceTier::Ambiguous => "AMBIGUOUS",
            ConfidenceTier::Unmatched => "UNMATCHED",
            ConfidenceTier::LookupFailed => "LOOKUP_FAILED",
        }
    }

    /// True for tiers that carry a selected candidate
    pub fn is_matched(&self) -> bool {
        matches!(
            self,
            ConfidenceTier::Exact | ConfidenceTier::High | ConfidenceTier::Low
        )
    }

    /// One step less confident; `Low` and non-match tiers stay put
    pub fn lowered(self) -> Self {
        match self {
            ConfidenceTier::Exact => ConfidenceTier::High,
            ConfidenceTier::High => ConfidenceTier::Low,
            other => other,
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Library side
// ============================================================================

/// Completion status as tracked by the personal library
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompletionStatus {
    #[default]
    NotPlayed,
    PlanToPlay,
    Playing,
    Played,
    Beaten,
    Completed,
    OnHold,
    Abandoned,
    /// Any status label the library defines beyond the standard set
    Other(String),
}

impl FromStr for CompletionStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Ok(match key.as_str() {
            "notplayed" => CompletionStatus::NotPlayed,
            "plantoplay" => CompletionStatus::PlanToPlay,
            "playing" => CompletionStatus::Playing,
            "played" => CompletionStatus::Played,
            "beaten" => CompletionStatus::Beaten,
            "completed" => CompletionStatus::Completed,
            "onhold" => CompletionStatus::OnHold,
            "abandoned" => CompletionStatus::Abandoned,
            _ => CompletionStatus::Other(s.trim().to_string()),
        })
    }
}

/// One game owned by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Stable opaque identifier from the library
    pub id: String,
    /// Title as the library spells it
    pub title: String,
    /// Title after normalization with the normalizer given to [`LibraryEntry::new`]
    ///
    /// The engine re-normalizes `title` with its own normalizer before
    /// querying, so this is informational.
    pub normalized_title: String,
    pub release_year: Option<i32>,
    pub is_dlc_or_expansion: bool,
    /// Hidden entries never enter resolution
    pub is_hidden: bool,
    pub completion_status: CompletionStatus,
}

impl LibraryEntry {
    /// Create an entry, rejecting a blank id or title
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        normalizer: &Normalizer,
    ) -> Result<Self, InputError> {
        let id = id.into().trim().to_string();
        let title = title.into();

        if id.is_empty() {
            return Err(InputError::MissingId { title });
        }
        if title.trim().is_empty() {
            return Err(InputError::MissingTitle { id });
        }

        let normalized_title = normalizer.normalize(&title);

        Ok(Self {
            id,
            title,
            normalized_title,
            release_year: None,
            is_dlc_or_expansion: false,
            is_hidden: false,
            completion_status: CompletionStatus::default(),
        })
    }

    pub fn with_release_year(mut self, year: Option<i32>) -> Self {
        self.release_year = year;
        self
    }

    pub fn with_dlc(mut self, is_dlc_or_expansion: bool) -> Self {
        self.is_dlc_or_expansion = is_dlc_or_expansion;
        self
    }

    pub fn with_hidden(mut self, is_hidden: bool) -> Self {
        self.is_hidden = is_hidden;
        self
    }

    pub fn with_completion_status(mut self, status: CompletionStatus) -> Self {
        self.completion_status = status;
        self
    }
}

// ============================================================================
// Catalog side
// ============================================================================

/// IGDB game type, as reported in the `category` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum IgdbCategory {
    MainGame,
    DlcAddon,
    Expansion,
    Bundle,
    StandaloneExpansion,
    Mod,
    Episode,
    Season,
    Remake,
    Remaster,
    ExpandedGame,
    Port,
    Fork,
    Pack,
    Update,
    Unknown(u32),
}

impl IgdbCategory {
    /// Human-readable name
    pub fn name(&self) -> String {
        let name = match self {
            IgdbCategory::MainGame => "Main Game",
            IgdbCategory::DlcAddon => "DLC/Addon",
            IgdbCategory::Expansion => "Expansion",
            IgdbCategory::Bundle => "Bundle",
            IgdbCategory::StandaloneExpansion => "Standalone Expansion",
            IgdbCategory::Mod => "Mod",
            IgdbCategory::Episode => "Episode",
            IgdbCategory::Season => "Season",
            IgdbCategory::Remake => "Remake",
            IgdbCategory::Remaster => "Remaster",
            IgdbCategory::ExpandedGame => "Expanded Game",
            IgdbCategory::Port => "Port",
            IgdbCategory::Fork => "Fork",
            IgdbCategory::Pack => "Pack",
            IgdbCategory::Update => "Update",
            IgdbCategory::Unknown(id) => return format!("Unknown ({})", id),
        };
        name.to_string()
    }

    pub fn is_main_game(&self) -> bool {
        matches!(self, IgdbCategory::MainGame)
    }
}

impl From<u32> for IgdbCategory {
    fn from(id: u32) -> Self {
        match id {
            0 => IgdbCategory::MainGame,
            1 => IgdbCategory::DlcAddon,
            2 => IgdbCategory::Expansion,
            3 => IgdbCategory::Bundle,
            4 => IgdbCategory::StandaloneExpansion,
            5 => IgdbCategory::Mod,
            6 => IgdbCategory::Episode,
            7 => IgdbCategory::Season,
            8 => IgdbCategory::Remake,
            9 => IgdbCategory::Remaster,
            10 => IgdbCategory::ExpandedGame,
            11 => IgdbCategory::Port,
            12 => IgdbCategory::Fork,
            13 => IgdbCategory::Pack,
            14 => IgdbCategory::Update,
            other => IgdbCategory::Unknown(other),
        }
    }
}

impl From<IgdbCategory> for u32 {
    fn from(category: IgdbCategory) -> Self {
        match category {
            IgdbCategory::MainGame => 0,
            IgdbCategory::DlcAddon => 1,
            IgdbCategory::Expansion => 2,
            IgdbCategory::Bundle => 3,
            IgdbCategory::StandaloneExpansion => 4,
            IgdbCategory::Mod => 5,
            IgdbCategory::Episode => 6,
            IgdbCategory::Season => 7,
            IgdbCategory::Remake => 8,
            IgdbCategory::Remaster => 9,
            IgdbCategory::ExpandedGame => 10,
            IgdbCategory::Port => 11,
            IgdbCategory::Fork => 12,
            IgdbCategory::Pack => 13,
            IgdbCategory::Update => 14,
            IgdbCategory::Unknown(id) => id,
        }
    }
}

/// HLTB-specific candidate payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HltbAttributes {
    /// Hours to finish the main story
    pub main_story_hours: Option<f64>,
    /// Hours for main story plus extras
    pub main_extra_hours: Option<f64>,
    /// Hours to 100%
    pub completionist_hours: Option<f64>,
    /// HLTB's own similarity figure for the query, kept for reference only
    pub provider_similarity: Option<f64>,
}

/// Incremental playtime split derived from HLTB cumulative figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaytimeBreakdown {
    pub main: Option<f64>,
    /// Extra hours on top of the main story
    pub extra: Option<f64>,
    /// Extra hours from main+extras to completionist
    pub completion: Option<f64>,
}

impl HltbAttributes {
    /// Split cumulative HLTB times into per-stage increments
    pub fn playtime_breakdown(&self) -> PlaytimeBreakdown {
        let delta = |later: Option<f64>, earlier: Option<f64>| match (later, earlier) {
            (Some(l), Some(e)) => Some((l - e).max(0.0)),
            _ => None,
        };
        PlaytimeBreakdown {
            main: self.main_story_hours,
            extra: delta(self.main_extra_hours, self.main_story_hours),
            completion: delta(self.completionist_hours, self.main_extra_hours),
        }
    }
}

/// IGDB-specific candidate payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IgdbAttributes {
    pub category: Option<IgdbCategory>,
    /// First release date as a unix timestamp
    pub first_release_date: Option<i64>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Source-tagged candidate payload, passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum RawAttributes {
    #[default]
    None,
    Hltb(HltbAttributes),
    Igdb(IgdbAttributes),
}

impl RawAttributes {
    /// Source this payload belongs to, if it is source-specific
    pub fn source(&self) -> Option<Source> {
        match self {
            RawAttributes::None => None,
            RawAttributes::Hltb(_) => Some(Source::Hltb),
            RawAttributes::Igdb(_) => Some(Source::Igdb),
        }
    }

    /// Per-stage playtime, for HLTB payloads only
    pub fn playtime_breakdown(&self) -> Option<PlaytimeBreakdown> {
        match self {
            RawAttributes::Hltb(attrs) => Some(attrs.playtime_breakdown()),
            _ => None,
        }
    }
}

/// One record offered by an external catalog for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub source: Source,
    pub candidate_id: String,
    pub candidate_title: String,
    #[serde(default)]
    pub candidate_release_year: Option<i32>,
    #[serde(default)]
    pub raw_attributes: RawAttributes,
}

impl MatchCandidate {
    pub fn new(source: Source, candidate_id: impl Into<String>, candidate_title: impl Into<String>) -> Self {
        Self {
            source,
            candidate_id: candidate_id.into(),
            candidate_title: candidate_title.into(),
            candidate_release_year: None,
            raw_attributes: RawAttributes::None,
        }
    }

    pub fn with_release_year(mut self, year: Option<i32>) -> Self {
        self.candidate_release_year = year;
        self
    }

    pub fn with_attributes(mut self, attributes: RawAttributes) -> Self {
        self.raw_attributes = attributes;
        self
    }

    /// Check the candidate is usable for `expected` source
    ///
    /// # Errors
    /// Returns a human-readable reason when the payload is malformed.
    pub fn validate(&self, expected: Source) -> Result<(), String> {
        if self.source != expected {
            return Err(format!(
                "candidate from {} returned by {} provider",
                self.source, expected
            ));
        }
        if self.candidate_id.trim().is_empty() {
            return Err("blank candidate id".to_string());
        }
        if self.candidate_title.trim().is_empty() {
            return Err(format!("blank title for candidate {}", self.candidate_id));
        }
        if let Some(attr_source) = self.raw_attributes.source() {
            if attr_source != self.source {
                return Err(format!(
                    "{} attributes attached to {} candidate {}",
                    attr_source, self.source, self.candidate_id
                ));
            }
        }
        Ok(())
    }
}

/// A candidate plus its score against one library entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: MatchCandidate,
    /// Similarity in [0, 1]
    pub similarity_score: f64,
    /// Absolute release-year difference; `None` if either year is unknown
    pub year_delta: Option<u32>,
}

impl ScoredCandidate {
    pub fn new(candidate: MatchCandidate, similarity_score: f64, entry_year: Option<i32>) -> Self {
        let year_delta = match (entry_year, candidate.candidate_release_year) {
            (Some(a), Some(b)) => Some(a.abs_diff(b)),
            _ => None,
        };
        Self {
            candidate,
            similarity_score: similarity_score.clamp(0.0, 1.0),
            year_delta,
        }
    }

    pub fn candidate_id(&self) -> &str {
        &self.candidate.candidate_id
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Outcome for one `(LibraryEntry, source)` pair
///
/// Built through the tier-specific constructors so `selected_candidate` is
/// present exactly when the tier is a match tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub library_id: String,
    pub library_title: String,
    pub source: Source,
    pub confidence_tier: ConfidenceTier,
    pub selected_candidate: Option<ScoredCandidate>,
    /// Best score seen among all candidates, `None` when nothing was scored
    pub top_score: Option<f64>,
    /// Runner-up candidates in rank order
    pub alternates: Vec<ScoredCandidate>,
    /// The year filter removed every candidate and the tier was lowered
    #[serde(default)]
    pub year_fallback: bool,
    /// Malformed candidates discarded before scoring
    #[serde(default)]
    pub dropped_candidates: usize,
    /// Why the lookup failed (only for `LookupFailed`)
    #[serde(default)]
    pub failure: Option<String>,
    /// Playtime split of the selected HLTB candidate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime: Option<PlaytimeBreakdown>,
}

impl MatchResult {
    fn base(entry: &LibraryEntry, source: Source, tier: ConfidenceTier) -> Self {
        Self {
            library_id: entry.id.clone(),
            library_title: entry.title.clone(),
            source,
            confidence_tier: tier,
            selected_candidate: None,
            top_score: None,
            alternates: Vec::new(),
            year_fallback: false,
            dropped_candidates: 0,
            failure: None,
            playtime: None,
        }
    }

    /// A selected match (`Exact`, `High` or `Low`)
    pub fn matched(
        entry: &LibraryEntry,
        source: Source,
        tier: ConfidenceTier,
        selected: ScoredCandidate,
        top_score: f64,
        alternates: Vec<ScoredCandidate>,
    ) -> Self {
        debug_assert!(tier.is_matched(), "matched() called with tier {}", tier);
        let mut result = Self::base(entry, source, tier);
        result.playtime = selected.candidate.raw_attributes.playtime_breakdown();
        result.selected_candidate = Some(selected);
        result.top_score = Some(top_score);
        result.alternates = alternates;
        result
    }

    /// Tied candidates, none selected
    pub fn ambiguous(
        entry: &LibraryEntry,
        source: Source,
        top_score: f64,
        alternates: Vec<ScoredCandidate>,
    ) -> Self {
        let mut result = Self::base(entry, source, ConfidenceTier::Ambiguous);
        result.top_score = Some(top_score);
        result.alternates = alternates;
        result
    }

    /// Nothing usable; `alternates` keeps the best rejected candidates
    pub fn unmatched(
        entry: &LibraryEntry,
        source: Source,
        top_score: Option<f64>,
        alternates: Vec<ScoredCandidate>,
    ) -> Self {
        let mut result = Self::base(entry, source, ConfidenceTier::Unmatched);
        result.top_score = top_score;
        result.alternates = alternates;
        result
    }

    /// The catalog could not be queried
    pub fn lookup_failed(entry: &LibraryEntry, source: Source, reason: impl Into<String>) -> Self {
        let mut result = Self::base(entry, source, ConfidenceTier::LookupFailed);
        result.failure = Some(reason.into());
        result
    }

    pub fn with_year_fallback(mut self, year_fallback: bool) -> Self {
        self.year_fallback = year_fallback;
        self
    }

    pub fn with_dropped_candidates(mut self, dropped: usize) -> Self {
        self.dropped_candidates = dropped;
        self
    }

    /// Selected candidate id, if any
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_candidate.as_ref().map(|c| c.candidate_id())
    }

    /// Check the tier/selection invariant
    pub fn is_consistent(&self) -> bool {
        self.confidence_tier.is_matched() == self.selected_candidate.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parsing_is_case_insensitive() {
        assert_eq!("hltb".parse::<Source>().unwrap(), Source::Hltb);
        assert_eq!(" IGDB ".parse::<Source>().unwrap(), Source::Igdb);
        assert!("steam".parse::<Source>().is_err());
    }

    #[test]
    fn test_tier_lowering() {
        assert_eq!(ConfidenceTier::Exact.lowered(), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::High.lowered(), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::Low.lowered(), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::Ambiguous.lowered(), ConfidenceTier::Ambiguous);
    }

    #[test]
    fn test_tier_serializes_screaming_snake() {
        let json = serde_json::to_string(&ConfidenceTier::LookupFailed).unwrap();
        assert_eq!(json, "\"LOOKUP_FAILED\"");
    }

    #[test]
    fn test_library_entry_rejects_blank_title() {
        let normalizer = Normalizer::default();
        let err = LibraryEntry::new("abc", "   ", &normalizer).unwrap_err();
        assert_eq!(err, InputError::MissingTitle { id: "abc".to_string() });
        assert!(LibraryEntry::new("", "Dead Space", &normalizer).is_err());
    }

    #[test]
    fn test_completion_status_parsing() {
        assert_eq!("Plan to Play".parse::<CompletionStatus>().unwrap(), CompletionStatus::PlanToPlay);
        assert_eq!("On Hold".parse::<CompletionStatus>().unwrap(), CompletionStatus::OnHold);
        assert_eq!(
            "Replaying".parse::<CompletionStatus>().unwrap(),
            CompletionStatus::Other("Replaying".to_string())
        );
    }

    #[test]
    fn test_igdb_category_round_trip_and_names() {
        assert_eq!(IgdbCategory::from(4).name(), "Standalone Expansion");
        assert_eq!(IgdbCategory::from(99).name(), "Unknown (99)");
        assert_eq!(u32::from(IgdbCategory::Remaster), 9);
        assert!(IgdbCategory::from(0).is_main_game());
    }

    #[test]
    fn test_hltb_playtime_breakdown() {
        let attrs = HltbAttributes {
            main_story_hours: Some(10.0),
            main_extra_hours: Some(14.5),
            completionist_hours: Some(20.0),
            provider_similarity: None,
        };
        let breakdown = attrs.playtime_breakdown();
        assert_eq!(breakdown.main, Some(10.0));
        assert_eq!(breakdown.extra, Some(4.5));
        assert_eq!(breakdown.completion, Some(5.5));
    }

    #[test]
    fn test_matched_result_carries_hltb_playtime() {
        let entry = LibraryEntry::new("lib", "Celeste", &Normalizer::default()).unwrap();
        let hltb = MatchCandidate::new(Source::Hltb, "h", "Celeste").with_attributes(
            RawAttributes::Hltb(HltbAttributes {
                main_story_hours: Some(8.0),
                main_extra_hours: Some(19.5),
                completionist_hours: Some(38.0),
                provider_similarity: None,
            }),
        );
        let result = MatchResult::matched(
            &entry,
            Source::Hltb,
            ConfidenceTier::Exact,
            ScoredCandidate::new(hltb, 1.0, None),
            1.0,
            Vec::new(),
        );
        let playtime = result.playtime.unwrap();
        assert_eq!(playtime.extra, Some(11.5));
        assert_eq!(playtime.completion, Some(18.5));

        let igdb = MatchCandidate::new(Source::Igdb, "i", "Celeste");
        let result = MatchResult::matched(
            &entry,
            Source::Igdb,
            ConfidenceTier::Exact,
            ScoredCandidate::new(igdb, 1.0, None),
            1.0,
            Vec::new(),
        );
        assert!(result.playtime.is_none());
        assert!(serde_json::to_value(&result).unwrap().get("playtime").is_none());
    }

    #[test]
    fn test_candidate_validation() {
        let ok = MatchCandidate::new(Source::Igdb, "42", "Dead Space")
            .with_attributes(RawAttributes::Igdb(IgdbAttributes::default()));
        assert!(ok.validate(Source::Igdb).is_ok());

        let wrong_payload = MatchCandidate::new(Source::Igdb, "42", "Dead Space")
            .with_attributes(RawAttributes::Hltb(HltbAttributes::default()));
        assert!(wrong_payload.validate(Source::Igdb).is_err());

        let blank_title = MatchCandidate::new(Source::Hltb, "7", "  ");
        assert!(blank_title.validate(Source::Hltb).is_err());

        let wrong_source = MatchCandidate::new(Source::Hltb, "7", "Dead Space");
        assert!(wrong_source.validate(Source::Igdb).is_err());
    }

    #[test]
    fn test_year_delta_is_absolute() {
        let candidate = MatchCandidate::new(Source::Hltb, "1", "Dead Space").with_release_year(Some(2008));
        let scored = ScoredCandidate::new(candidate.clone(), 1.0, Some(2023));
        assert_eq!(scored.year_delta, Some(15));
        let unknown = ScoredCandidate::new(candidate, 1.0, None);
        assert_eq!(unknown.year_delta, None);
    }

    #[test]
    fn test_raw_attributes_json_is_tagged() {
        let attrs = RawAttributes::Igdb(IgdbAttributes {
            category: Some(IgdbCategory::Remake),
            first_release_date: Some(1_674_000_000),
            platforms: vec!["PC".to_string()],
        });
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json["kind"], "IGDB");
        assert_eq!(json["category"], 8);
        let back: RawAttributes = serde_json::from_value(json).unwrap();
        assert_eq!(back, attrs);
    }
}
