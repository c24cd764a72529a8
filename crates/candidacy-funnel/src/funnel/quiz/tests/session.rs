use std::sync::Arc;

use super::common::*;
use crate::funnel::quiz::classifier::ResultTier;
use crate::funnel::quiz::session::{QuizSession, SessionError};
use crate::funnel::quiz::store::{JsonFileStore, SessionStore};

#[test]
fn answers_overwrite_without_leaving_residue() {
    let store = Arc::new(MemoryStore::default());
    let mut session = QuizSession::start(store, session_id("overwrite"));

    session.set_answer(3, "accelerating").expect("valid step");
    session.set_answer(3, "stable").expect("valid step");

    assert_eq!(session.answers().get(&3).map(String::as_str), Some("stable"));
    assert_eq!(session.answers().len(), 1);
}

#[test]
fn step_zero_is_rejected_everywhere() {
    let store = Arc::new(MemoryStore::default());
    let mut session = QuizSession::start(store, session_id("zero"));

    assert!(matches!(
        session.set_answer(0, "crown"),
        Err(SessionError::InvalidStep(0))
    ));
    assert!(matches!(
        session.set_current_step(0),
        Err(SessionError::InvalidStep(0))
    ));
    assert!(session.answers().is_empty());
    assert_eq!(session.current_step(), 1);
}

#[test]
fn cursor_accepts_positions_past_the_catalog_end() {
    let store = Arc::new(MemoryStore::default());
    let mut session = QuizSession::start(store, session_id("far"));

    let saved = session.set_current_step(12).expect("valid step");

    assert!(saved.is_durable());
    assert_eq!(session.current_step(), 12);
}

#[test]
fn every_mutation_snapshots_the_full_state() {
    let store = Arc::new(MemoryStore::default());
    let id = session_id("snapshot");
    let mut session = QuizSession::start(store.clone(), id.clone());

    session.set_answer(1, "diffuse").expect("valid step");
    session.set_current_step(2).expect("valid step");

    let persisted = store.snapshot(&id).expect("snapshot written");
    assert_eq!(&persisted, session.state());
}

#[test]
fn restoring_immediately_after_a_mutation_is_exact() {
    let store = Arc::new(MemoryStore::default());
    let id = session_id("resume");

    let mut session = QuizSession::start(store.clone(), id.clone());
    session.set_answer(1, "diffuse").expect("valid step");
    session.set_answer(3, "recent").expect("valid step");
    session.set_answer(7, "prevent").expect("valid step");
    session.set_current_step(4).expect("valid step");

    let restored = QuizSession::resume_or_start(store, id);

    assert_eq!(restored.state(), session.state());
    assert_eq!(restored.current_step(), 4);
    assert_eq!(
        restored.answers().get(&7).map(String::as_str),
        Some("prevent")
    );
}

#[test]
fn reset_clears_answers_cursor_and_snapshot() {
    let store = Arc::new(MemoryStore::default());
    let id = session_id("reset");
    let mut session = QuizSession::start(store.clone(), id.clone());

    session.set_answer(1, "crown").expect("valid step");
    session.set_answer(2, "over_2_years").expect("valid step");
    session.set_current_step(5).expect("valid step");

    let saved = session.reset();

    assert!(saved.is_durable());
    assert!(session.answers().is_empty());
    assert_eq!(session.current_step(), 1);
    assert_eq!(store.snapshot(&id), None);
}

#[test]
fn storage_failure_keeps_the_in_memory_mutation() {
    let store = Arc::new(FullDiskStore);
    let mut session = QuizSession::start(store, session_id("volatile"));

    let saved = session.set_answer(1, "diffuse").expect("valid step");

    assert!(!saved.is_durable());
    assert_eq!(
        session.answers().get(&1).map(String::as_str),
        Some("diffuse")
    );

    let saved = session.reset();
    assert!(!saved.is_durable());
    assert!(session.answers().is_empty());
}

#[test]
fn unreadable_snapshot_degrades_to_a_fresh_session() {
    let store = Arc::new(CorruptStore);

    let session = QuizSession::resume_or_start(store, session_id("corrupt"));

    assert!(session.answers().is_empty());
    assert_eq!(session.current_step(), 1);
}

#[test]
fn classification_is_available_mid_quiz() {
    let store = Arc::new(MemoryStore::default());
    let mut session = QuizSession::start(store, session_id("midway"));

    assert_eq!(session.classify(), ResultTier::Partial);

    session.set_answer(7, "no").expect("valid step");

    assert_eq!(session.classify(), ResultTier::Unfit);
}

#[test]
fn file_store_round_trips_sessions_on_disk() {
    let dir = std::env::temp_dir().join(format!(
        "candidacy-funnel-test-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos()
    ));
    let store = Arc::new(JsonFileStore::new(&dir));
    let id = session_id("disk");

    let mut session = QuizSession::start(store.clone(), id.clone());
    session.set_answer(1, "diffuse").expect("valid step");
    session.set_current_step(2).expect("valid step");

    let restored = QuizSession::resume_or_start(store.clone(), id.clone());
    assert_eq!(restored.state(), session.state());

    store.clear(&id).expect("clear succeeds");
    assert!(store.load(&id).expect("load succeeds").is_none());

    std::fs::remove_dir_all(&dir).expect("cleanup");
}
