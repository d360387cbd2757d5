//! Countdown engine implementation.
//!
//! The engine is a tick-driven state machine. It does not own a thread or a
//! task - the caller (see [`super::Ticker`]) calls `tick()` once per tick
//! interval while the engine reports `is_running()`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> Completed -> (start) Running
//!   \________\__________\___________\_____(reset)____-> Idle
//! ```
//!
//! ## Completion
//!
//! A run fires `Event::TimerCompleted` at most once: either when `tick()`
//! reaches zero (full duration) or when `reset()` interrupts a run that made
//! progress (partial duration). `has_finished` guards against a second
//! firing until a new run begins.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::{CompletionReason, Event};

/// Derived lifecycle label for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Countdown reached zero and the user hasn't started a new run yet.
    Completed,
}

/// Core countdown engine.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    /// Configured run length in seconds.
    duration_secs: u64,
    /// Remaining seconds, `0 <= time_left_secs <= duration_secs`.
    time_left_secs: u64,
    is_running: bool,
    has_finished: bool,
    just_finished: bool,
    /// Duration requested mid-run; applied at the next reset or expiry.
    pending_duration_secs: Option<u64>,
}

/// Whole minutes, rounding half up.
pub fn secs_to_minutes(secs: u64) -> u64 {
    (secs + 30) / 60
}

impl CountdownEngine {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            duration_secs,
            time_left_secs: duration_secs,
            is_running: false,
            has_finished: false,
            just_finished: false,
            pending_duration_secs: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn just_finished(&self) -> bool {
        self.just_finished
    }

    /// Seconds counted down so far in the current run.
    pub fn elapsed_secs(&self) -> u64 {
        self.duration_secs.saturating_sub(self.time_left_secs)
    }

    pub fn state(&self) -> TimerState {
        if self.is_running {
            TimerState::Running
        } else if self.has_finished && self.time_left_secs == 0 {
            TimerState::Completed
        } else if self.time_left_secs < self.duration_secs {
            TimerState::Paused
        } else {
            TimerState::Idle
        }
    }

    /// 0.0 .. 1.0 progress within the current run.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.elapsed_secs() as f64 / self.duration_secs as f64
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            duration_secs: self.duration_secs,
            remaining_secs: self.time_left_secs,
            just_finished: self.just_finished,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin ticking from the current `time_left_secs`.
    ///
    /// Starting after a natural expiry begins a fresh run.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        if self.time_left_secs == 0 {
            self.rearm();
        }
        if self.time_left_secs == 0 {
            // Zero-length duration: nothing to count down.
            return None;
        }
        self.just_finished = false;
        self.is_running = true;
        Some(Event::TimerStarted {
            duration_secs: self.duration_secs,
            remaining_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Stop and rewind to the full duration.
    ///
    /// Returns `TimerCompleted` with reason `Interrupted` when the run had
    /// progress and had not already completed, `TimerReset` otherwise.
    pub fn reset(&mut self) -> Option<Event> {
        let worked_secs = self.elapsed_secs();
        let fire = worked_secs > 0 && !self.has_finished;

        self.is_running = false;
        self.just_finished = false;
        self.rearm();

        if fire {
            Some(Event::TimerCompleted {
                worked_minutes: secs_to_minutes(worked_secs),
                reason: CompletionReason::Interrupted,
                at: Utc::now(),
            })
        } else {
            Some(Event::TimerReset { at: Utc::now() })
        }
    }

    /// Change the configured duration.
    ///
    /// While running the change is deferred so the current countdown keeps
    /// its length.
    pub fn set_duration(&mut self, duration_secs: u64) {
        if self.is_running {
            self.pending_duration_secs = Some(duration_secs);
            return;
        }
        self.duration_secs = duration_secs;
        self.time_left_secs = duration_secs;
        self.has_finished = false;
        self.pending_duration_secs = None;
    }

    /// Count down one second. Returns `TimerCompleted` once on expiry.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs > 0 {
            return None;
        }

        self.is_running = false;
        self.just_finished = true;
        if self.has_finished {
            return None;
        }
        self.has_finished = true;
        let worked_minutes = secs_to_minutes(self.duration_secs);
        if let Some(next) = self.pending_duration_secs.take() {
            // The completed run keeps its own length; the deferred value
            // only shapes the next run.
            self.duration_secs = next;
        }
        Some(Event::TimerCompleted {
            worked_minutes,
            reason: CompletionReason::Expired,
            at: Utc::now(),
        })
    }

    pub fn acknowledge_finish(&mut self) {
        self.just_finished = false;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn rearm(&mut self) {
        if let Some(next) = self.pending_duration_secs.take() {
            self.duration_secs = next;
        }
        self.time_left_secs = self.duration_secs;
        self.has_finished = false;
    }
}
