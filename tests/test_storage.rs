use space_shooter::error::StoreError;
use space_shooter::storage::*;

// ── MemoryStore ───────────────────────────────────────────────────────────────

#[test]
fn memory_store_get_set() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("highScore").unwrap(), None);
    store.set("highScore", "40").unwrap();
    assert_eq!(store.get("highScore").unwrap().as_deref(), Some("40"));
}

// ── FileStore ─────────────────────────────────────────────────────────────────

#[test]
fn file_store_missing_key_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    assert_eq!(store.get("highScore").unwrap(), None);
}

#[test]
fn file_store_creates_dir_and_writes_one_file_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested");
    let mut store = FileStore::new(&nested);
    store.set("highScore", "70").unwrap();

    assert_eq!(std::fs::read_to_string(nested.join("highScore")).unwrap(), "70");
    assert!(!nested.join("highScore.tmp").exists());
    assert_eq!(store.get("highScore").unwrap().as_deref(), Some("70"));
}

#[test]
fn file_store_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set("highScore", "10").unwrap();
    store.set("highScore", "20").unwrap();
    assert_eq!(store.get("highScore").unwrap().as_deref(), Some("20"));
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    assert!(matches!(store.get("../x"), Err(StoreError::InvalidKey(_))));
    assert!(matches!(store.set("", "1"), Err(StoreError::InvalidKey(_))));
}

#[test]
fn default_dir_is_app_specific() {
    assert!(FileStore::default_dir().ends_with("space_shooter"));
}

// ── HighScoreStore ────────────────────────────────────────────────────────────

#[test]
fn high_score_missing_loads_zero() {
    let scores = HighScoreStore::new(MemoryStore::new());
    assert_eq!(scores.load(), 0);
}

#[test]
fn high_score_unparseable_loads_zero() {
    let mut store = MemoryStore::new();
    store.set(HIGH_SCORE_KEY, "lots").unwrap();
    assert_eq!(HighScoreStore::new(store).load(), 0);
}

#[test]
fn high_score_tolerates_whitespace() {
    let mut store = MemoryStore::new();
    store.set(HIGH_SCORE_KEY, "130\n").unwrap();
    assert_eq!(HighScoreStore::new(store).load(), 130);
}

#[test]
fn high_score_saved_as_decimal_string() {
    let mut store = MemoryStore::new();
    let mut scores = HighScoreStore::new(&mut store);
    scores.save(250);
    assert_eq!(scores.load(), 250);
    assert_eq!(store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("250"));
}

#[test]
fn high_score_round_trips_through_files() {
    let dir = tempfile::tempdir().unwrap();
    HighScoreStore::new(FileStore::new(dir.path())).save(90);
    assert_eq!(HighScoreStore::new(FileStore::new(dir.path())).load(), 90);
}

#[test]
fn unreadable_store_loads_zero() {
    // A directory where the value file should be makes the read fail
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(HIGH_SCORE_KEY)).unwrap();
    assert_eq!(HighScoreStore::new(FileStore::new(dir.path())).load(), 0);
}

#[test]
fn boxed_store_forwards() {
    let boxed: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
    let mut scores = HighScoreStore::new(boxed);
    scores.save(5);
    assert_eq!(scores.load(), 5);
}
