//! # Focusdial Core Library
//!
//! Core logic for the Focusdial focus timer. Every operation is available
//! through the standalone `focusdial` CLI, which is a thin layer over this
//! crate.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven countdown state machine plus a Tokio ticker
//!   that calls `tick()` once per interval
//! - **Storage**: a small JSON key-value namespace over SQLite, daily
//!   analytics records and TOML configuration
//! - **Session**: work/break status, streak bookkeeping and completion
//!   notifications
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: countdown state machine
//! - [`SessionOrchestrator`]: records completions and advances streaks
//! - [`SessionRunner`]: drives an orchestrator from a Tokio task
//! - [`Storage`]: fail-soft typed access to persisted keys
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::{CompletionReason, Event};
pub use session::{
    Notification, NotificationSink, SessionOrchestrator, SessionRunner, SessionSnapshot,
    SubscriptionId, WorkStatus,
};
pub use storage::{
    Choices, Config, DailyAnalyticsRecord, DailySummary, KvBackend, MemoryBackend, SessionEntry,
    SqliteBackend, Storage, Theme, WeekSummary,
};
pub use timer::{CountdownEngine, TimerState, WorkMode};
