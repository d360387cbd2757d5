//! Per-day analytics records.
//!
//! Each calendar day (`YYYY-MM-DD`) and each in-progress streak
//! (`YYYY-MM-DD-Multiple`) is stored as
//! `{ "sessions": [...], "time": <minutes>, "sessionCount": <n> }`.
//!
//! Older builds wrote a bare array of entries, or a single entry object.
//! Those shapes are decoded through [`StoredAnalytics`] and normalised into
//! [`DailyAnalyticsRecord`] at the storage boundary; entries are never
//! dropped during normalisation.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::timer::WorkMode;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
pub const MULTIPLE_SUFFIX: &str = "-Multiple";

/// Storage key of the streak record for `day_key`.
pub fn multiple_key(day_key: &str) -> String {
    format!("{day_key}{MULTIPLE_SUFFIX}")
}

/// Parse a plain day key; `-Multiple` keys and other keys yield `None`.
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    if key.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// One completed (or interrupted) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Worked minutes as written. Older builds sometimes stored fractions,
    /// negatives or strings here; those are kept untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<WorkMode>,
    /// Fields this build doesn't know about, kept so rewrites are lossless.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionEntry {
    pub fn new(time: u64, session: WorkMode) -> Self {
        Self {
            time: Some(Value::from(time)),
            session: Some(session),
            extra: Map::new(),
        }
    }

    /// Decode one stored entry without ever rejecting it.
    ///
    /// `time` is kept exactly as stored. A `session` that doesn't decode as
    /// a work mode is kept verbatim in `extra`. Non-object entries are
    /// wrapped as `{"value": <entry>}`.
    pub fn from_value(value: Value) -> Self {
        let mut obj = match value {
            Value::Object(obj) => obj,
            other => {
                let mut extra = Map::new();
                extra.insert("value".to_string(), other);
                return Self {
                    time: None,
                    session: None,
                    extra,
                };
            }
        };

        let time = obj.remove("time");
        let session = match obj.remove("session") {
            Some(raw) => match serde_json::from_value::<WorkMode>(raw.clone()) {
                Ok(mode) => Some(mode),
                Err(_) => {
                    obj.insert("session".to_string(), raw);
                    None
                }
            },
            None => None,
        };

        Self {
            time,
            session,
            extra: obj,
        }
    }

    /// Worked minutes counted towards the aggregates.
    ///
    /// Fractions round to the nearest minute; anything that isn't a
    /// positive finite number counts as 0.
    pub fn minutes(&self) -> u64 {
        let Some(Value::Number(n)) = &self.time else {
            return 0;
        };
        n.as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|t| t.is_finite() && *t > 0.0)
                    .map(|t| t.round() as u64)
            })
            .unwrap_or(0)
    }

    /// The stored `time` value, if any.
    pub fn raw_time(&self) -> Option<&Value> {
        self.time.as_ref()
    }
}

/// Every shape a day key has been written in.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredAnalytics {
    /// `{ "sessions": [...], ... }` - aggregates are recomputed, not trusted.
    Current { sessions: Vec<Value> },
    /// A bare array of entries.
    LegacyArray(Vec<Value>),
    /// A single entry object (or anything else).
    LegacySingleton(Value),
}

impl StoredAnalytics {
    pub fn into_sessions(self) -> Vec<SessionEntry> {
        let raw = match self {
            StoredAnalytics::Current { sessions } => sessions,
            StoredAnalytics::LegacyArray(items) => items,
            StoredAnalytics::LegacySingleton(Value::Null) => Vec::new(),
            StoredAnalytics::LegacySingleton(item) => vec![item],
        };
        raw.into_iter().map(SessionEntry::from_value).collect()
    }
}

impl From<StoredAnalytics> for DailyAnalyticsRecord {
    fn from(stored: StoredAnalytics) -> Self {
        DailyAnalyticsRecord::from_sessions(stored.into_sessions())
    }
}

/// Append-only session history with its aggregates.
///
/// `time` and `session_count` are projections of `sessions`; the only way
/// to change them is to append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredAnalytics")]
pub struct DailyAnalyticsRecord {
    sessions: Vec<SessionEntry>,
    time: u64,
    session_count: usize,
}

impl DailyAnalyticsRecord {
    pub fn from_sessions(sessions: Vec<SessionEntry>) -> Self {
        let mut record = Self {
            sessions,
            time: 0,
            session_count: 0,
        };
        record.recompute();
        record
    }

    /// Normalise whatever JSON is stored under a day key.
    pub fn from_stored(value: Value) -> Self {
        match serde_json::from_value::<StoredAnalytics>(value) {
            Ok(stored) => stored.into(),
            // Untagged decoding falls back to LegacySingleton(Value), which
            // accepts anything.
            Err(_) => Self::default(),
        }
    }

    pub fn push(&mut self, entry: SessionEntry) {
        self.sessions.push(entry);
        self.recompute();
    }

    pub fn sessions(&self) -> &[SessionEntry] {
        &self.sessions
    }

    /// Total worked minutes.
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn session_count(&self) -> usize {
        self.session_count
    }

    fn recompute(&mut self) {
        self.time = self
            .sessions
            .iter()
            .map(SessionEntry::minutes)
            .fold(0, u64::saturating_add);
        self.session_count = self.sessions.len();
    }
}

impl Default for DailyAnalyticsRecord {
    fn default() -> Self {
        Self::from_sessions(Vec::new())
    }
}

/// Daily goal used for the progress ring.
pub const DEFAULT_DAILY_GOAL_MIN: u64 = 480;

/// Display-ready view of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub total_minutes: u64,
    pub hours: u64,
    pub minutes: u64,
    pub session_count: usize,
    /// 0.0 .. 1.0 of the daily goal.
    pub goal_progress: f64,
    pub compliment: &'static str,
}

impl DailySummary {
    pub fn new(date: &str, record: &DailyAnalyticsRecord, daily_goal_min: u64) -> Self {
        let total = record.time();
        let goal_progress = if daily_goal_min == 0 {
            1.0
        } else {
            (total as f64 / daily_goal_min as f64).min(1.0)
        };
        Self {
            date: date.to_string(),
            total_minutes: total,
            hours: total / 60,
            minutes: total % 60,
            session_count: record.session_count(),
            goal_progress,
            compliment: compliment_for(total),
        }
    }

    /// "2h 5m" or "45m".
    pub fn formatted(&self) -> String {
        if self.hours > 0 {
            format!("{}h {}m", self.hours, self.minutes)
        } else {
            format!("{}m", self.minutes)
        }
    }
}

pub fn compliment_for(total_minutes: u64) -> &'static str {
    match total_minutes {
        0 => "No work yet - get started!",
        1..=59 => "Good start! Keep going.",
        60..=179 => "Nice work! You're building momentum.",
        180..=359 => "Great job! You're making serious progress.",
        _ => "Amazing! You've worked hard today!",
    }
}

/// Totals over the seven days ending at `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub start: String,
    pub end: String,
    pub total_minutes: u64,
    pub session_count: usize,
    pub days: Vec<DailySummary>,
}

impl WeekSummary {
    /// Build from `(date, record)` pairs; days outside the window are
    /// ignored and missing days count as empty.
    pub fn new<'a, I>(end: NaiveDate, records: I, daily_goal_min: u64) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, &'a DailyAnalyticsRecord)>,
    {
        let start = end - Duration::days(6);
        let empty = DailyAnalyticsRecord::default();
        let found: Vec<_> = records
            .into_iter()
            .filter(|(d, _)| *d >= start && *d <= end)
            .collect();

        let days: Vec<DailySummary> = start
            .iter_days()
            .take(7)
            .map(|day| {
                let record = found
                    .iter()
                    .find(|(d, _)| *d == day)
                    .map(|(_, r)| *r)
                    .unwrap_or(&empty);
                DailySummary::new(&day.format(DATE_KEY_FORMAT).to_string(), record, daily_goal_min)
            })
            .collect();

        Self {
            start: start.format(DATE_KEY_FORMAT).to_string(),
            end: end.format(DATE_KEY_FORMAT).to_string(),
            total_minutes: days
                .iter()
                .map(|d| d.total_minutes)
                .fold(0, u64::saturating_add),
            session_count: days.iter().map(|d| d.session_count).sum(),
            days,
        }
    }
}
