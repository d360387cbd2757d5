//! Session orchestration.
//!
//! Glues the selected [`WorkMode`], the [`CountdownEngine`] and the analytics
//! storage together:
//!
//! - every completion is appended to today's record;
//! - streak modes also append to `<today>-Multiple` and advance the streak
//!   index, clearing the streak record when the last planned block is done;
//! - the work/break status is persisted and published to observers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use super::notify::{Notification, NotificationSink, Notifier, SubscriptionId};
use super::status::{StatusCell, WorkStatus};
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, ValidationError};
use crate::events::{CompletionReason, Event};
use crate::storage::analytics::multiple_key;
use crate::storage::{
    Choices, Config, DailyAnalyticsRecord, DefaultsConfig, KvBackend, SessionEntry, SqliteBackend,
    Storage, SESSION_INDEX_KEY, SESSION_TYPE_KEY, WORK_STATUS_KEY,
};
use crate::timer::{CountdownEngine, TimerState, WorkMode};

/// Largest streak length the session count picker offers.
pub const MAX_SESSION_COUNT: u32 = 10;

/// Streak position as of `day`; stale once the date rolls over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StreakMarker {
    day: String,
    index: u32,
}

/// Display view of the orchestrator.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub mode_id: String,
    pub mode_label: String,
    pub status: WorkStatus,
    pub state: TimerState,
    pub duration_secs: u64,
    pub remaining_secs: u64,
    pub just_finished: bool,
    pub progress: f64,
    pub selected_minutes: u32,
    pub multiple_session: bool,
    pub session_index: u32,
    pub session_count: u32,
    pub today: String,
}

pub struct SessionOrchestrator<B: KvBackend = SqliteBackend, C: Clock = SystemClock> {
    storage: Storage<B>,
    clock: C,
    engine: CountdownEngine,
    mode: WorkMode,
    status: StatusCell,
    notifier: Notifier,
    session_index: u32,
    session_count: u32,
    selected_minutes: u32,
    defaults: DefaultsConfig,
}

impl SessionOrchestrator<SqliteBackend, SystemClock> {
    /// Restore the session stored on disk for `config`.
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Storage::open(config)?,
            SystemClock,
            config.defaults.clone(),
        ))
    }
}

impl<B: KvBackend, C: Clock> SessionOrchestrator<B, C> {
    /// Restore mode, status, choices and streak progress from storage.
    pub fn new(storage: Storage<B>, clock: C, defaults: DefaultsConfig) -> Self {
        let mode = match storage
            .get::<WorkMode>(SESSION_TYPE_KEY)
            .and_then(WorkMode::canonical)
        {
            Some(mode) => mode,
            None => {
                let mode = WorkMode::default();
                storage.set(SESSION_TYPE_KEY, &mode);
                mode
            }
        };
        let status: WorkStatus = storage.get(WORK_STATUS_KEY).unwrap_or_default();
        let choices = storage.choices();

        let session_count = choices
            .session_count
            .unwrap_or(defaults.session_count)
            .clamp(1, MAX_SESSION_COUNT);
        // Records written before the marker existed only have the streak
        // record to go on.
        let session_index = if mode.multiple_session {
            let today = clock.today_key();
            storage
                .get::<StreakMarker>(SESSION_INDEX_KEY)
                .filter(|marker| marker.day == today)
                .map(|marker| marker.index)
                .or_else(|| {
                    storage
                        .get::<DailyAnalyticsRecord>(&multiple_key(&today))
                        .map(|r| r.session_count() as u32)
                })
                .unwrap_or(0)
                .min(session_count - 1)
        } else {
            0
        };

        let mut orchestrator = Self {
            storage,
            clock,
            engine: CountdownEngine::new(0),
            mode,
            status: StatusCell::new(status),
            notifier: Notifier::new(),
            session_index,
            session_count,
            selected_minutes: 0,
            defaults,
        };
        let remembered = orchestrator.remembered_minutes(&choices);
        orchestrator.apply_minutes(remembered);
        debug!(
            mode = %orchestrator.mode.id,
            status = orchestrator.status().label(),
            minutes = orchestrator.selected_minutes,
            session_index,
            session_count,
            "session restored"
        );
        orchestrator
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> &WorkMode {
        &self.mode
    }

    pub fn status(&self) -> WorkStatus {
        self.status.get()
    }

    pub fn session_index(&self) -> u32 {
        self.session_index
    }

    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    pub fn selected_minutes(&self) -> u32 {
        self.selected_minutes
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn storage(&self) -> &Storage<B> {
        &self.storage
    }

    pub fn today_key(&self) -> String {
        self.clock.today_key()
    }

    /// Upper bound of the minutes picker in the current status.
    pub fn max_minutes(&self) -> u32 {
        if self.status().is_break {
            self.defaults.break_max_minutes.max(self.mode.interval)
        } else {
            self.mode.max_duration
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode_id: self.mode.id.to_string(),
            mode_label: self.mode.label.to_string(),
            status: self.status(),
            state: self.engine.state(),
            duration_secs: self.engine.duration_secs(),
            remaining_secs: self.engine.time_left_secs(),
            just_finished: self.engine.just_finished(),
            progress: self.engine.progress(),
            selected_minutes: self.selected_minutes,
            multiple_session: self.mode.multiple_session,
            session_index: self.session_index,
            session_count: self.session_count,
            today: self.clock.today_key(),
        }
    }

    // ── Observers ────────────────────────────────────────────────────

    pub fn subscribe(&mut self, sink: impl NotificationSink + 'static) -> SubscriptionId {
        self.notifier.subscribe(sink)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn subscribe_status(&self) -> watch::Receiver<WorkStatus> {
        self.status.subscribe()
    }

    // ── Timer controls ───────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.engine.start()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.engine.pause()
    }

    /// Count down one second, recording the run if it just expired.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick();
        if let Some(event) = &event {
            self.dispatch(event);
        }
        event
    }

    /// Rewind the timer, recording partial progress if there was any.
    pub fn reset(&mut self) -> Option<Event> {
        let event = self.engine.reset();
        if let Some(event) = &event {
            self.dispatch(event);
        }
        event
    }

    pub fn acknowledge_finish(&mut self) {
        self.engine.acknowledge_finish();
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Switch work mode. Only allowed while the timer is stopped.
    ///
    /// Clamps the selected minutes to the new mode and abandons today's
    /// streak.
    pub fn select_mode(&mut self, mode: WorkMode) -> Result<(), ValidationError> {
        if self.engine.is_running() {
            return Err(ValidationError::TimerRunning {
                action: "change work mode",
            });
        }
        let id = mode.id.to_string();
        let mode = mode
            .canonical()
            .ok_or(ValidationError::UnknownMode(id))?;
        if mode == self.mode {
            return Ok(());
        }

        self.storage.set(SESSION_TYPE_KEY, &mode);
        self.mode = mode;
        self.apply_minutes(self.selected_minutes.min(self.max_minutes()));
        self.abandon_streak();
        info!(mode = %self.mode.id, minutes = self.selected_minutes, "work mode selected");
        Ok(())
    }

    pub fn select_mode_by_id(&mut self, id: &str) -> Result<(), ValidationError> {
        let mode = WorkMode::by_id(id).ok_or_else(|| ValidationError::UnknownMode(id.to_string()))?;
        self.select_mode(mode)
    }

    /// Pick a new duration; it is snapped to the mode's step and remembered
    /// as the work or break time depending on the current status.
    pub fn set_minutes(&mut self, minutes: u32) -> Result<u32, ValidationError> {
        if self.engine.is_running() {
            return Err(ValidationError::TimerRunning {
                action: "change the duration",
            });
        }
        let applied = self.apply_minutes(minutes);
        let patch = if self.status().is_break {
            Choices::break_time(applied)
        } else {
            Choices::work_time(applied)
        };
        self.storage.update_choices(patch);
        Ok(applied)
    }

    /// Plan a streak of `count` blocks, restarting progress.
    pub fn set_session_count(&mut self, count: u32) -> Result<(), ValidationError> {
        if !(1..=MAX_SESSION_COUNT).contains(&count) {
            return Err(ValidationError::OutOfRange {
                field: "session count",
                value: count as u64,
                min: 1,
                max: MAX_SESSION_COUNT as u64,
            });
        }
        self.session_count = count;
        self.storage.update_choices(Choices::session_count(count));
        self.abandon_streak();
        Ok(())
    }

    /// Jump to block `index` of the current streak. The jump is persisted.
    pub fn set_session_index(&mut self, index: u32) -> Result<(), ValidationError> {
        if index >= self.session_count {
            return Err(ValidationError::OutOfRange {
                field: "session index",
                value: index as u64,
                min: 0,
                max: self.session_count.saturating_sub(1) as u64,
            });
        }
        self.set_index(index);
        Ok(())
    }

    // ── Work / break ─────────────────────────────────────────────────

    /// Working -> OnBreak.
    pub fn take_break(&mut self) -> Result<(), ValidationError> {
        self.switch_status(WorkStatus::ON_BREAK, "take a break")
    }

    /// OnBreak -> Working.
    pub fn next_session(&mut self) -> Result<(), ValidationError> {
        self.switch_status(WorkStatus::WORKING, "start the next session")
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn switch_status(
        &mut self,
        status: WorkStatus,
        action: &'static str,
    ) -> Result<(), ValidationError> {
        if self.engine.is_running() {
            return Err(ValidationError::TimerRunning { action });
        }
        self.engine.acknowledge_finish();
        self.set_status(status);
        let choices = self.storage.choices();
        let remembered = self.remembered_minutes(&choices);
        self.apply_minutes(remembered);
        Ok(())
    }

    fn set_status(&mut self, status: WorkStatus) {
        self.storage.set(WORK_STATUS_KEY, &status);
        if self.status.set(status) {
            info!(status = status.label(), "work status changed");
        }
    }

    fn remembered_minutes(&self, choices: &Choices) -> u32 {
        if self.status().is_break {
            choices.break_time.unwrap_or(self.defaults.break_minutes)
        } else {
            choices.work_time.unwrap_or(self.defaults.work_minutes)
        }
    }

    /// Snap, store and push the duration into an idle engine.
    fn apply_minutes(&mut self, minutes: u32) -> u32 {
        let snapped = self.mode.snap_minutes(minutes, self.max_minutes());
        self.selected_minutes = snapped;
        self.engine.set_duration(u64::from(snapped) * 60);
        snapped
    }

    fn set_index(&mut self, index: u32) {
        self.session_index = index;
        let marker = StreakMarker {
            day: self.clock.today_key(),
            index,
        };
        self.storage.set(SESSION_INDEX_KEY, &marker);
    }

    fn abandon_streak(&mut self) {
        self.set_index(0);
        self.storage.remove(&multiple_key(&self.clock.today_key()));
    }

    fn dispatch(&mut self, event: &Event) {
        if let Some((worked_minutes, reason)) = event.completion() {
            self.on_completion(worked_minutes, reason);
        }
    }

    fn on_completion(&mut self, worked_minutes: u64, reason: CompletionReason) {
        let today = self.clock.today_key();
        let entry = SessionEntry::new(worked_minutes, self.mode.clone());

        if reason == CompletionReason::Interrupted {
            if worked_minutes == 0 {
                debug!("interrupted run rounds to zero minutes; nothing recorded");
                return;
            }
            self.storage.update(&today, entry);
            info!(key = %today, worked_minutes, "partial session recorded");
            return;
        }

        self.storage.update(&today, entry.clone());
        info!(key = %today, worked_minutes, mode = %self.mode.id, "session recorded");

        let streak_key = multiple_key(&today);
        let notification = if self.mode.multiple_session && !self.status().is_break {
            self.storage.update(&streak_key, entry);

            if self.session_index + 1 >= self.session_count {
                self.storage.remove(&streak_key);
                self.set_index(0);
                self.set_status(WorkStatus::WORKING);
                info!(sessions = self.session_count, "streak complete");
                Notification::StreakComplete {
                    worked_minutes,
                    sessions: self.session_count,
                    at: Utc::now(),
                }
            } else {
                self.set_index(self.session_index + 1);
                Notification::SessionComplete {
                    worked_minutes,
                    session_index: self.session_index,
                    at: Utc::now(),
                }
            }
        } else {
            self.storage.remove(&streak_key);
            Notification::SessionComplete {
                worked_minutes,
                session_index: self.session_index,
                at: Utc::now(),
            }
        };

        self.notifier.emit(&notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryBackend;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    const TODAY: &str = "2026-10-19";

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn orchestrator() -> SessionOrchestrator<MemoryBackend, FixedClock> {
        SessionOrchestrator::new(
            Storage::new(MemoryBackend::new()),
            clock(),
            DefaultsConfig::default(),
        )
    }

    fn collect(o: &mut SessionOrchestrator<MemoryBackend, FixedClock>) -> Arc<Mutex<Vec<bool>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        o.subscribe(move |n: &Notification| s.lock().unwrap().push(n.streak_done()));
        seen
    }

    fn run_to_end(o: &mut SessionOrchestrator<MemoryBackend, FixedClock>) {
        o.start();
        while o.is_running() {
            o.tick();
        }
    }

    #[test]
    fn fresh_storage_defaults() {
        let o = orchestrator();
        assert_eq!(o.mode(), &WorkMode::BASIC_POMODORO);
        assert_eq!(o.status(), WorkStatus::WORKING);
        assert_eq!(o.session_count(), 5);
        // 45 minutes remembered by default, clamped to Pomodoro's 60 cap.
        assert_eq!(o.selected_minutes(), 45);
        assert_eq!(o.engine().duration_secs(), 45 * 60);
        assert_eq!(
            o.storage().get::<WorkMode>(SESSION_TYPE_KEY),
            Some(WorkMode::BASIC_POMODORO)
        );
    }

    #[test]
    fn stored_mode_and_choices_are_restored() {
        let storage = Storage::new(MemoryBackend::new());
        storage.set(SESSION_TYPE_KEY, &WorkMode::MINDFULNESS);
        storage.set(
            crate::storage::CHOICES_KEY,
            &Choices {
                work_time: Some(12),
                session_count: Some(3),
                ..Choices::default()
            },
        );
        let o = SessionOrchestrator::new(storage, clock(), DefaultsConfig::default());
        assert_eq!(o.mode(), &WorkMode::MINDFULNESS);
        assert_eq!(o.selected_minutes(), 12);
        assert_eq!(o.session_count(), 3);
    }

    #[test]
    fn streak_progress_is_restored_from_today() {
        let storage = Storage::new(MemoryBackend::new());
        storage.update(
            &multiple_key(TODAY),
            SessionEntry::new(25, WorkMode::BASIC_POMODORO),
        );
        storage.update(
            &multiple_key(TODAY),
            SessionEntry::new(25, WorkMode::BASIC_POMODORO),
        );
        let o = SessionOrchestrator::new(storage, clock(), DefaultsConfig::default());
        assert_eq!(o.session_index(), 2);
    }

    #[test]
    fn todays_marker_wins_over_streak_record() {
        let storage = Storage::new(MemoryBackend::new());
        storage.set(SESSION_INDEX_KEY, &serde_json::json!({"day": TODAY, "index": 3}));
        let o = SessionOrchestrator::new(storage, clock(), DefaultsConfig::default());
        assert_eq!(o.session_index(), 3);
    }

    #[test]
    fn stale_marker_is_ignored() {
        let storage = Storage::new(MemoryBackend::new());
        storage.set(SESSION_INDEX_KEY, &serde_json::json!({"day": "2026-10-18", "index": 3}));
        storage.update(
            &multiple_key(TODAY),
            SessionEntry::new(25, WorkMode::BASIC_POMODORO),
        );
        let o = SessionOrchestrator::new(storage, clock(), DefaultsConfig::default());
        assert_eq!(o.session_index(), 1);
    }

    #[test]
    fn marker_follows_every_index_change() {
        let mut o = orchestrator();
        o.set_minutes(1).unwrap();
        let marker = |o: &SessionOrchestrator<MemoryBackend, FixedClock>| {
            o.storage().get::<StreakMarker>(SESSION_INDEX_KEY).map(|m| (m.day, m.index))
        };

        run_to_end(&mut o);
        assert_eq!(marker(&o), Some((TODAY.to_string(), 1)));
        o.set_session_index(3).unwrap();
        assert_eq!(marker(&o), Some((TODAY.to_string(), 3)));
        o.select_mode(WorkMode::DEEP_FOCUS).unwrap();
        assert_eq!(marker(&o), Some((TODAY.to_string(), 0)));
    }

    #[test]
    fn snapshot_reports_progress() {
        let mut o = orchestrator();
        o.set_minutes(10).unwrap();
        assert_eq!(o.snapshot().progress, 0.0);
        o.start();
        for _ in 0..150 {
            o.tick();
        }
        assert_eq!(o.snapshot().progress, 0.25);
    }

    #[test]
    fn simple_session_records_and_clears_stray_streak() {
        let mut o = orchestrator();
        o.select_mode(WorkMode::SIMPLE_SESSION).unwrap();
        o.set_minutes(20).unwrap();
        o.storage()
            .update(&multiple_key(TODAY), SessionEntry::new(5, WorkMode::BASIC_POMODORO));
        let seen = collect(&mut o);

        run_to_end(&mut o);

        let record = o.storage().record(TODAY);
        assert_eq!(record.session_count(), 1);
        assert_eq!(record.time(), 20);
        assert_eq!(record.sessions()[0].session, Some(WorkMode::SIMPLE_SESSION));
        assert!(o.storage().get::<DailyAnalyticsRecord>(&multiple_key(TODAY)).is_none());
        assert_eq!(*seen.lock().unwrap(), vec![false]);
    }

    #[test]
    fn pomodoro_streak_of_four() {
        let mut o = orchestrator();
        o.set_session_count(4).unwrap();
        o.set_minutes(1).unwrap();
        let seen = collect(&mut o);

        for expected_index in 1..=3 {
            run_to_end(&mut o);
            assert_eq!(o.session_index(), expected_index);
            let streak = o.storage().record(&multiple_key(TODAY));
            assert_eq!(streak.session_count(), expected_index as usize);
        }

        run_to_end(&mut o);
        assert_eq!(o.session_index(), 0);
        assert!(o.storage().get::<DailyAnalyticsRecord>(&multiple_key(TODAY)).is_none());
        assert_eq!(*seen.lock().unwrap(), vec![false, false, false, true]);

        let today = o.storage().record(TODAY);
        assert_eq!(today.session_count(), 4);
        assert_eq!(today.time(), 4);
    }

    #[test]
    fn break_completion_does_not_advance_streak() {
        let mut o = orchestrator();
        o.set_minutes(1).unwrap();
        run_to_end(&mut o);
        assert_eq!(o.session_index(), 1);

        o.take_break().unwrap();
        assert!(o.status().is_break);
        assert_eq!(o.selected_minutes(), 10);
        o.set_minutes(1).unwrap();
        run_to_end(&mut o);

        assert_eq!(o.session_index(), 1);
        assert!(o.storage().get::<DailyAnalyticsRecord>(&multiple_key(TODAY)).is_none());
        assert_eq!(o.storage().record(TODAY).session_count(), 2);
        assert_eq!(o.storage().choices().break_time, Some(1));
    }

    #[test]
    fn streak_completion_returns_to_work() {
        let mut o = orchestrator();
        o.set_session_count(1).unwrap();
        o.set_minutes(1).unwrap();
        // Status flipped to break outside a run, then back before the last block.
        o.take_break().unwrap();
        o.next_session().unwrap();
        let mut rx = o.subscribe_status();
        run_to_end(&mut o);
        assert_eq!(o.status(), WorkStatus::WORKING);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), WorkStatus::WORKING);
    }

    #[test]
    fn partial_reset_records_today_only() {
        let mut o = orchestrator();
        o.set_minutes(30).unwrap();
        let seen = collect(&mut o);
        o.start();
        for _ in 0..(10 * 60) {
            o.tick();
        }
        let event = o.reset().unwrap();
        assert_eq!(event.completion(), Some((10, CompletionReason::Interrupted)));

        let record = o.storage().record(TODAY);
        assert_eq!(record.time(), 10);
        assert_eq!(o.session_index(), 0);
        assert!(o.storage().get::<DailyAnalyticsRecord>(&multiple_key(TODAY)).is_none());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn reset_without_progress_writes_nothing() {
        let mut o = orchestrator();
        let seen = collect(&mut o);
        o.reset();
        o.start();
        o.reset();
        assert!(o.storage().get::<serde_json::Value>(TODAY).is_none());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn sub_half_minute_reset_writes_nothing() {
        let mut o = orchestrator();
        o.start();
        for _ in 0..20 {
            o.tick();
        }
        o.reset();
        assert!(o.storage().get::<serde_json::Value>(TODAY).is_none());
    }

    #[test]
    fn mode_switch_clamps_and_abandons_streak() {
        let mut o = orchestrator();
        o.set_minutes(1).unwrap();
        run_to_end(&mut o);
        assert_eq!(o.session_index(), 1);

        o.select_mode(WorkMode::DEEP_FOCUS).unwrap();
        o.set_minutes(200).unwrap();
        o.select_mode(WorkMode::MINDFULNESS).unwrap();
        assert_eq!(o.selected_minutes(), 15);
        assert_eq!(o.engine().duration_secs(), 15 * 60);
        assert_eq!(o.session_index(), 0);
        assert!(o.storage().get::<DailyAnalyticsRecord>(&multiple_key(TODAY)).is_none());
        assert_eq!(
            o.storage().get::<WorkMode>(SESSION_TYPE_KEY),
            Some(WorkMode::MINDFULNESS)
        );
    }

    #[test]
    fn mode_switch_rejected_while_running() {
        let mut o = orchestrator();
        o.start();
        assert_eq!(
            o.select_mode(WorkMode::DEEP_FOCUS),
            Err(ValidationError::TimerRunning {
                action: "change work mode"
            })
        );
        assert!(o.set_minutes(10).is_err());
        assert!(o.take_break().is_err());
    }

    #[test]
    fn unknown_mode_id_is_rejected() {
        let mut o = orchestrator();
        assert_eq!(
            o.select_mode_by_id("marathon"),
            Err(ValidationError::UnknownMode("marathon".into()))
        );
    }

    #[test]
    fn minutes_snap_to_mode_step() {
        let mut o = orchestrator();
        o.select_mode(WorkMode::SIMPLE_SESSION).unwrap();
        assert_eq!(o.set_minutes(37).unwrap(), 35);
        assert_eq!(o.set_minutes(500).unwrap(), 120);
        assert_eq!(o.storage().choices().work_time, Some(120));
    }

    #[test]
    fn break_minutes_use_break_ceiling() {
        let mut o = orchestrator();
        o.take_break().unwrap();
        assert_eq!(o.max_minutes(), 30);
        assert_eq!(o.set_minutes(55).unwrap(), 30);
        o.next_session().unwrap();
        assert_eq!(o.selected_minutes(), 45);
    }

    #[test]
    fn session_count_and_index_bounds() {
        let mut o = orchestrator();
        assert!(o.set_session_count(0).is_err());
        assert!(o.set_session_count(11).is_err());
        o.set_session_count(3).unwrap();
        assert!(o.set_session_index(3).is_err());
        o.set_session_index(2).unwrap();
        assert_eq!(o.session_index(), 2);
        assert_eq!(o.storage().choices().session_count, Some(3));
    }

    #[test]
    fn jump_to_last_block_finishes_streak() {
        let mut o = orchestrator();
        o.set_session_count(4).unwrap();
        o.set_session_index(3).unwrap();
        o.set_minutes(1).unwrap();
        let seen = collect(&mut o);
        run_to_end(&mut o);
        assert_eq!(*seen.lock().unwrap(), vec![true]);
    }

    #[test]
    fn status_is_persisted() {
        let mut o = orchestrator();
        o.take_break().unwrap();
        assert_eq!(
            o.storage().get::<WorkStatus>(WORK_STATUS_KEY),
            Some(WorkStatus::ON_BREAK)
        );
    }

    #[test]
    fn unsubscribed_sink_is_silent() {
        let mut o = orchestrator();
        o.set_minutes(1).unwrap();
        let seen = Arc::new(Mutex::new(0));
        let s = seen.clone();
        let id = o.subscribe(move |_: &Notification| *s.lock().unwrap() += 1);
        assert!(o.unsubscribe(id));
        run_to_end(&mut o);
        assert_eq!(*seen.lock().unwrap(), 0);
    }
}
