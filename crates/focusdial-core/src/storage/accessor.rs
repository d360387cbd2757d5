//! Typed, fail-soft access to the key-value namespace.
//!
//! Nothing here returns an error to the caller: decode failures read as
//! absent, write failures are logged and dropped. Callers treat missing
//! data as empty/default.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::analytics::{parse_day_key, DailyAnalyticsRecord, SessionEntry, StoredAnalytics};
use super::backend::{KvBackend, SqliteBackend};
use super::choices::Choices;
use super::config::Config;
use crate::error::StorageError;

pub const SESSION_TYPE_KEY: &str = "sessionType";
pub const WORK_STATUS_KEY: &str = "workStatus";
pub const CHOICES_KEY: &str = "choices";
pub const SESSION_INDEX_KEY: &str = "sessionIndex";

pub struct Storage<B: KvBackend = SqliteBackend> {
    backend: B,
}

impl Storage<SqliteBackend> {
    /// Open the database named by `config` inside the data directory.
    pub fn open(config: &Config) -> crate::error::Result<Self> {
        let path = config.db_path()?;
        Ok(Self::new(SqliteBackend::open(&path)?))
    }
}

impl<B: KvBackend> Storage<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Decode the value stored at `key`.
    ///
    /// Returns `None` if the key is missing or its value doesn't decode as
    /// `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "failed to read storage key");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "failed to decode storage key");
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key, error = %e, "failed to encode storage value");
                return;
            }
        };
        if let Err(e) = self.backend.write(key, &encoded) {
            warn!(key, error = %e, "failed to write storage key");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.delete(key) {
            warn!(key, error = %e, "failed to remove storage key");
        }
    }

    /// Append `entry` to the session history at `key` and recompute its
    /// aggregates, all in one backend transaction.
    ///
    /// Whatever was stored before is normalised rather than replaced; a
    /// value that isn't even JSON is kept as a legacy entry. Returns the
    /// record as written, or `None` if the write failed.
    pub fn update(&self, key: &str, entry: SessionEntry) -> Option<DailyAnalyticsRecord> {
        let mut written = None;
        let result = self.backend.modify(key, &mut |current| {
            let mut record = match current {
                None => DailyAnalyticsRecord::default(),
                Some(raw) => match serde_json::from_str::<Value>(&raw) {
                    Ok(value) => DailyAnalyticsRecord::from_stored(value),
                    Err(e) => {
                        warn!(
                            key,
                            error = %e,
                            "stored analytics is not JSON; keeping it as a legacy entry"
                        );
                        StoredAnalytics::LegacySingleton(Value::String(raw)).into()
                    }
                },
            };
            record.push(entry.clone());
            let encoded = serde_json::to_string(&record).map_err(|source| StorageError::Encode {
                key: key.to_string(),
                source,
            })?;
            written = Some(record);
            Ok(encoded)
        });

        match result {
            Ok(_) => {
                if let Some(record) = &written {
                    debug!(
                        key,
                        time = record.time(),
                        session_count = record.session_count(),
                        "analytics updated"
                    );
                }
                written
            }
            Err(e) => {
                warn!(key, error = %e, "failed to update analytics");
                None
            }
        }
    }

    /// The normalised analytics record at `key`, empty if absent.
    pub fn record(&self, key: &str) -> DailyAnalyticsRecord {
        self.get::<DailyAnalyticsRecord>(key).unwrap_or_default()
    }

    /// Every plain day record in the namespace, oldest first.
    pub fn daily_records(&self) -> Vec<(chrono::NaiveDate, DailyAnalyticsRecord)> {
        let keys = match self.backend.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "failed to list storage keys");
                return Vec::new();
            }
        };
        let mut records: Vec<_> = keys
            .iter()
            .filter_map(|key| parse_day_key(key).map(|date| (date, self.record(key))))
            .collect();
        records.sort_by_key(|(date, _)| *date);
        records
    }

    pub fn choices(&self) -> Choices {
        self.get(CHOICES_KEY).unwrap_or_default()
    }

    /// Merge `patch` into the stored choices.
    pub fn update_choices(&self, patch: Choices) -> Choices {
        let mut choices = self.choices();
        choices.merge(patch);
        self.set(CHOICES_KEY, &choices);
        choices
    }
}
