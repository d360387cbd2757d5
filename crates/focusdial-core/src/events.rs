use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Why a countdown run completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionReason {
    /// The countdown reached zero on its own.
    Expired,
    /// The run was reset after some progress had been made.
    Interrupted,
}

/// Every state change of the countdown engine produces an Event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Fired at most once per run.
    TimerCompleted {
        worked_minutes: u64,
        reason: CompletionReason,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        duration_secs: u64,
        remaining_secs: u64,
        just_finished: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Worked minutes and reason if this is a completion.
    pub fn completion(&self) -> Option<(u64, CompletionReason)> {
        match self {
            Event::TimerCompleted {
                worked_minutes,
                reason,
                ..
            } => Some((*worked_minutes, *reason)),
            _ => None,
        }
    }
}
