//! End-to-end pipeline tests
//!
//! Library export on disk → fixture providers → engine → per-source reports.

use gamelink_match::ingest::load_library_csv;
use gamelink_match::types::RawAttributes;
use gamelink_match::{
    build_reports, ConfidenceTier, FixtureProvider, MatchConfig, ResolutionEngine, Source,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const LIBRARY: &str = "\
Id,Name,Hidden,Categories,CompletionStatus,ReleaseDate
g1,Dead Space,False,,Beaten,2023-01-27
g2,Pokémon Red Version,False,,Completed,1998-09-28
g3,Halo (Xbox),False,,Played,2001-11-15
g4,Secret Game,True,,Played,
g5,Mystery Title,False,,Not Played,
g6,Xbox Console Companion,False,Apps,Not Played,
";

const HLTB: &str = r#"{
    "Dead Space": [
        { "id": "h1", "title": "Dead Space", "year": 2023,
          "attributes": { "kind": "HLTB", "main_story_hours": 10.5, "main_extra_hours": 12.0,
                          "completionist_hours": 16.5 } }
    ],
    "Halo": [
        { "id": "h2", "title": "Halo", "year": 2001 }
    ]
}"#;

const IGDB: &str = r#"{
    "Dead Space": [
        { "id": "1", "title": "Dead Space", "year": 2008,
          "attributes": { "kind": "IGDB", "category": 0 } },
        { "id": "2", "title": "Dead Space", "year": 2023,
          "attributes": { "kind": "IGDB", "category": 8 } }
    ],
    "Pokemon Red Version": [
        { "id": "10", "title": "Pokemon Red & Blue" }
    ],
    "Halo": [
        { "id": "20", "title": "Halo: Combat Evolved", "year": 2001 },
        { "id": "21", "title": "Halo 2", "year": 2004 }
    ]
}"#;

struct Workspace {
    _dir: TempDir,
    engine: ResolutionEngine,
    entries: Vec<gamelink_match::LibraryEntry>,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let library_path = dir.path().join("library.csv");
    let hltb_path = dir.path().join("hltb.json");
    let igdb_path = dir.path().join("igdb.json");
    std::fs::write(&library_path, LIBRARY).unwrap();
    std::fs::write(&hltb_path, HLTB).unwrap();
    std::fs::write(&igdb_path, IGDB).unwrap();

    let mut engine = ResolutionEngine::new(MatchConfig::default()).unwrap();
    let library = load_library_csv(&library_path, engine.normalizer()).unwrap();
    assert_eq!(library.excluded, 1);
    assert!(library.rejected.is_empty());

    let hltb = FixtureProvider::from_path(Source::Hltb, &hltb_path, engine.normalizer()).unwrap();
    let igdb = FixtureProvider::from_path(Source::Igdb, &igdb_path, engine.normalizer()).unwrap();
    engine.register_provider(Arc::new(hltb));
    engine.register_provider(Arc::new(igdb));

    Workspace {
        _dir: dir,
        engine,
        entries: library.entries,
    }
}

#[tokio::test]
async fn test_library_resolves_against_both_catalogs() {
    let ws = workspace();
    let outcome = ws
        .engine
        .resolve(&ws.entries, &Source::ALL, &CancellationToken::new())
        .await
        .unwrap();

    // 5 loaded entries, one hidden, two sources
    assert_eq!(outcome.results.len(), 8);
    assert_eq!(outcome.summary.hidden_skipped, 1);

    let find = |id: &str, source: Source| {
        outcome
            .results
            .iter()
            .find(|r| r.library_id == id && r.source == source)
            .unwrap()
    };

    let dead_space = find("g1", Source::Igdb);
    assert_eq!(dead_space.confidence_tier, ConfidenceTier::Exact);
    assert_eq!(dead_space.selected_id(), Some("2"));

    let dead_space_hltb = find("g1", Source::Hltb);
    assert_eq!(dead_space_hltb.confidence_tier, ConfidenceTier::Exact);
    let selected = dead_space_hltb.selected_candidate.as_ref().unwrap();
    match &selected.candidate.raw_attributes {
        RawAttributes::Hltb(attrs) => assert_eq!(attrs.main_story_hours, Some(10.5)),
        other => panic!("unexpected attributes {:?}", other),
    }
    let playtime = dead_space_hltb.playtime.unwrap();
    assert_eq!(playtime.main, Some(10.5));
    assert_eq!(playtime.extra, Some(1.5));
    assert_eq!(playtime.completion, Some(4.5));
    assert!(dead_space.playtime.is_none());

    let pokemon = find("g2", Source::Igdb);
    assert_eq!(pokemon.confidence_tier, ConfidenceTier::Low);
    assert_eq!(pokemon.selected_id(), Some("10"));

    // Platform tag stripped before lookup
    assert_eq!(find("g3", Source::Hltb).confidence_tier, ConfidenceTier::Exact);
    assert_eq!(find("g3", Source::Igdb).confidence_tier, ConfidenceTier::Unmatched);

    assert_eq!(find("g5", Source::Hltb).confidence_tier, ConfidenceTier::Unmatched);
    assert!(outcome.results.iter().all(|r| r.is_consistent()));
}

#[tokio::test]
async fn test_reports_summarise_each_source() {
    let ws = workspace();
    let outcome = ws
        .engine
        .resolve(&ws.entries, &Source::ALL, &CancellationToken::new())
        .await
        .unwrap();

    let reports = build_reports(&Source::ALL, &outcome.results, ws.engine.config());
    assert_eq!(reports.len(), 2);

    let igdb = &reports[&Source::Igdb];
    assert_eq!(igdb.total, 4);
    assert_eq!(igdb.count(ConfidenceTier::Exact), 1);
    assert_eq!(igdb.count(ConfidenceTier::Low), 1);
    assert_eq!(igdb.count(ConfidenceTier::Unmatched), 2);
    assert_eq!(igdb.non_main_games.get("Remake"), Some(&1));
    let review: Vec<_> = igdb.review.iter().map(|r| r.library_title.as_str()).collect();
    assert_eq!(review, vec!["Halo", "Mystery Title", "Pokémon Red Version"]);

    let hltb = &reports[&Source::Hltb];
    assert_eq!(hltb.total, 4);
    assert_eq!(hltb.matched(), 2);
    assert_eq!(hltb.review.len(), 2);
    assert!((hltb.match_rate() - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_results_serialize_with_tier_names() {
    let ws = workspace();
    let outcome = ws
        .engine
        .resolve(&ws.entries, &[Source::Igdb], &CancellationToken::new())
        .await
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    let first = &json["results"][0];
    assert_eq!(first["library_id"], "g1");
    assert_eq!(first["source"], "IGDB");
    assert_eq!(first["confidence_tier"], "EXACT");
    assert_eq!(json["summary"]["pairs_resolved"], 4);
}
