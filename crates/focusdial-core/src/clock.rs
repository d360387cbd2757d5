use chrono::{Local, NaiveDate};

use crate::storage::analytics::DATE_KEY_FORMAT;

/// Source of the current calendar date.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;

    /// Today's analytics key, `YYYY-MM-DD` in local time.
    fn today_key(&self) -> String {
        self.today().format(DATE_KEY_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
