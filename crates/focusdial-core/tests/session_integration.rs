//! End-to-end session flows over a file-backed SQLite store.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use focusdial_core::storage::analytics::multiple_key;
use focusdial_core::storage::{DefaultsConfig, SESSION_TYPE_KEY};
use focusdial_core::{
    CompletionReason, DailyAnalyticsRecord, FixedClock, Notification, SessionOrchestrator,
    SessionRunner, SqliteBackend, Storage, WorkMode, WorkStatus,
};
use serde_json::{json, Value};
use tempfile::TempDir;

const TODAY: &str = "2026-10-19";

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
}

fn open(path: &Path) -> SessionOrchestrator<SqliteBackend, FixedClock> {
    let storage = Storage::new(SqliteBackend::open(path).unwrap());
    SessionOrchestrator::new(storage, clock(), DefaultsConfig::default())
}

fn run_to_end(o: &mut SessionOrchestrator<SqliteBackend, FixedClock>) {
    o.start();
    while o.is_running() {
        o.tick();
    }
}

fn record_notifications(
    o: &mut SessionOrchestrator<SqliteBackend, FixedClock>,
) -> Arc<Mutex<Vec<Notification>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = seen.clone();
    o.subscribe(move |n: &Notification| s.lock().unwrap().push(n.clone()));
    seen
}

#[test]
fn pomodoro_streak_survives_restart() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("focusdial.db");

    {
        let mut o = open(&db);
        o.set_session_count(4).unwrap();
        o.set_minutes(25).unwrap();
        run_to_end(&mut o);
        run_to_end(&mut o);
        assert_eq!(o.session_index(), 2);
    }

    // A new process picks up the streak where it stopped.
    let mut o = open(&db);
    assert_eq!(o.mode(), &WorkMode::BASIC_POMODORO);
    assert_eq!(o.session_count(), 4);
    assert_eq!(o.selected_minutes(), 25);
    assert_eq!(o.session_index(), 2);

    let seen = record_notifications(&mut o);
    run_to_end(&mut o);
    run_to_end(&mut o);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(!seen[0].streak_done());
    assert!(seen[1].streak_done());
    assert_eq!(o.session_index(), 0);
    assert_eq!(o.status(), WorkStatus::WORKING);

    let today = o.storage().record(TODAY);
    assert_eq!(today.session_count(), 4);
    assert_eq!(today.time(), 100);
    assert!(o
        .storage()
        .get::<DailyAnalyticsRecord>(&multiple_key(TODAY))
        .is_none());
}

#[test]
fn streak_position_survives_restart_around_a_break() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("focusdial.db");

    {
        let mut o = open(&db);
        o.set_session_count(3).unwrap();
        o.set_minutes(1).unwrap();
        run_to_end(&mut o);
        assert_eq!(o.session_index(), 1);
    }
    {
        let mut o = open(&db);
        assert_eq!(o.session_index(), 1);
        o.take_break().unwrap();
    }
    {
        let mut o = open(&db);
        assert_eq!(o.status(), WorkStatus::ON_BREAK);
        o.set_minutes(1).unwrap();
        run_to_end(&mut o);
        // The break completion clears the streak record.
        assert!(o
            .storage()
            .get::<DailyAnalyticsRecord>(&multiple_key(TODAY))
            .is_none());
    }
    {
        let mut o = open(&db);
        assert_eq!(o.session_index(), 1);
        o.next_session().unwrap();
        run_to_end(&mut o);
    }

    let o = open(&db);
    assert_eq!(o.session_index(), 2);
    assert_eq!(o.session_count(), 3);
}

#[test]
fn jump_survives_restart() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("focusdial.db");
    open(&db).set_session_index(3).unwrap();
    assert_eq!(open(&db).session_index(), 3);
}

#[test]
fn simple_session_single_completion() {
    let dir = TempDir::new().unwrap();
    let mut o = open(&dir.path().join("focusdial.db"));
    o.select_mode(WorkMode::SIMPLE_SESSION).unwrap();
    o.set_minutes(20).unwrap();
    let seen = record_notifications(&mut o);

    run_to_end(&mut o);

    let record = o.storage().record(TODAY);
    assert_eq!(record.time(), 20);
    assert_eq!(record.session_count(), 1);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(!seen[0].streak_done());
    assert!(o.engine().just_finished());
}

#[test]
fn zero_progress_reset_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut o = open(&dir.path().join("focusdial.db"));
    o.start();
    let event = o.reset().unwrap();
    assert_eq!(event.completion(), None);
    assert!(o.storage().get::<Value>(TODAY).is_none());
}

#[test]
fn legacy_day_record_is_extended() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("focusdial.db");
    {
        let storage = Storage::new(SqliteBackend::open(&db).unwrap());
        storage.set(TODAY, &json!([{"time": 30}, {"time": 15, "note": "old build"}]));
        storage.set(SESSION_TYPE_KEY, &WorkMode::MINDFULNESS);
    }

    let mut o = open(&db);
    o.set_minutes(10).unwrap();
    run_to_end(&mut o);

    let record = o.storage().record(TODAY);
    assert_eq!(record.session_count(), 3);
    assert_eq!(record.time(), 55);
    assert_eq!(record.sessions()[1].extra["note"], json!("old build"));

    let raw: Value = o.storage().get(TODAY).unwrap();
    assert_eq!(raw["sessionCount"], 3);
    assert_eq!(raw["time"], 55);
}

#[test]
fn partial_run_keeps_streak_intact() {
    let dir = TempDir::new().unwrap();
    let mut o = open(&dir.path().join("focusdial.db"));
    o.set_minutes(1).unwrap();
    run_to_end(&mut o);
    assert_eq!(o.session_index(), 1);

    o.set_minutes(30).unwrap();
    o.start();
    for _ in 0..(5 * 60) {
        o.tick();
    }
    let event = o.reset().unwrap();
    assert_eq!(event.completion(), Some((5, CompletionReason::Interrupted)));

    assert_eq!(o.session_index(), 1);
    assert_eq!(o.storage().record(TODAY).time(), 6);
    assert_eq!(o.storage().record(&multiple_key(TODAY)).session_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn runner_completes_over_sqlite() {
    let dir = TempDir::new().unwrap();
    let mut o = open(&dir.path().join("focusdial.db"));
    o.select_mode(WorkMode::MINDFULNESS).unwrap();
    o.set_minutes(1).unwrap();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Notification>();
    o.subscribe(tx);

    let mut runner = SessionRunner::new(o, Duration::from_secs(1));
    runner.start().await;
    let notification: Notification = rx.recv().await.unwrap();
    assert!(!notification.streak_done());

    let o = runner.lock().await;
    assert_eq!(o.storage().record(TODAY).time(), 1);
    assert_eq!(o.engine().time_left_secs(), 0);
}
