//! Remembered picker values stored under the `choices` key.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// `{workTime?, breakTime?, sessionCount?, theme?}`.
///
/// Every field is optional so a partial value can be merged over the stored
/// one without clobbering the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Choices {
    /// Overlay the fields set in `patch`.
    pub fn merge(&mut self, patch: Choices) {
        if patch.work_time.is_some() {
            self.work_time = patch.work_time;
        }
        if patch.break_time.is_some() {
            self.break_time = patch.break_time;
        }
        if patch.session_count.is_some() {
            self.session_count = patch.session_count;
        }
        if patch.theme.is_some() {
            self.theme = patch.theme;
        }
    }

    pub fn work_time(minutes: u32) -> Self {
        Self {
            work_time: Some(minutes),
            ..Self::default()
        }
    }

    pub fn break_time(minutes: u32) -> Self {
        Self {
            break_time: Some(minutes),
            ..Self::default()
        }
    }

    pub fn session_count(count: u32) -> Self {
        Self {
            session_count: Some(count),
            ..Self::default()
        }
    }

    pub fn theme(theme: Theme) -> Self {
        Self {
            theme: Some(theme),
            ..Self::default()
        }
    }
}
