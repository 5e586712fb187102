//! Leaderboard persistence tests.
//!
//! These tests cover both stores:
//! - Ranking and truncation
//! - The JSON file store round trip on disk
//! - Missing and malformed files

use std::path::PathBuf;

use deckbound::core::Difficulty;
use deckbound::game::{GameOutcome, ScoreBreakdown};
use deckbound::persistence::{JsonFileStore, LeaderboardEntry, MemoryStore, ScoreStore, LEADERBOARD_LIMIT};
use deckbound::player::{PlayerClass, Scoring};

fn entry(name: &str, score: i64) -> LeaderboardEntry {
    LeaderboardEntry {
        player_name: name.to_string(),
        class: PlayerClass::Mage,
        difficulty: Difficulty::Hard,
        score,
        outcome: GameOutcome::Victory,
        scoring: Scoring::default(),
        breakdown: ScoreBreakdown::default(),
        history: Vec::new(),
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("deckbound-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test that the memory store ranks best first and keeps ties in order.
#[test]
fn test_memory_ranking() {
    let mut store = MemoryStore::new();
    for (name, score) in [("a", 10), ("b", 30), ("c", 10), ("d", 20)] {
        store.save(entry(name, score)).unwrap();
    }
    let names: Vec<_> = store.list().unwrap().into_iter().map(|e| e.player_name).collect();
    assert_eq!(names, vec!["b", "d", "a", "c"]);
}

/// Test that only the best entries are kept.
#[test]
fn test_memory_truncation() {
    let mut store = MemoryStore::new();
    for score in 0..(LEADERBOARD_LIMIT as i64 + 5) {
        store.save(entry("p", score)).unwrap();
    }
    let entries = store.list().unwrap();
    assert_eq!(entries.len(), LEADERBOARD_LIMIT);
    assert_eq!(entries[0].score, LEADERBOARD_LIMIT as i64 + 4);
    assert_eq!(entries.last().unwrap().score, 5);
}

/// Test that a missing file is an empty leaderboard.
#[test]
fn test_json_missing_file() {
    init_tracing();
    let dir = scratch_dir("missing");
    let store = JsonFileStore::new(dir.join("scores.json"));
    assert!(store.list().unwrap().is_empty());
}

/// Test saving and reloading through the file store.
#[test]
fn test_json_round_trip() {
    init_tracing();
    let dir = scratch_dir("round-trip");
    let path = dir.join("nested").join("scores.json");

    let mut store = JsonFileStore::new(&path);
    store.save(entry("low", 5)).unwrap();
    store.save(entry("high", 50)).unwrap();
    assert!(path.exists());

    let reopened = JsonFileStore::new(&path);
    let entries = reopened.list().unwrap();
    assert_eq!(entries, vec![entry("high", 50), entry("low", 5)]);

    let _ = std::fs::remove_dir_all(&dir);
}

/// Test that a corrupt file is reported rather than overwritten.
#[test]
fn test_json_corrupt_file() {
    let dir = scratch_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scores.json");
    std::fs::write(&path, "not json").unwrap();

    let mut store = JsonFileStore::new(&path);
    let err = store.list().unwrap_err();
    assert!(err.to_string().contains("invalid leaderboard file"));
    assert!(store.save(entry("x", 1)).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");

    let _ = std::fs::remove_dir_all(&dir);
}
