use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A named session preset.
///
/// Presets are constants; the struct is also what gets written under the
/// `sessionType` storage key, so field names follow the stored camelCase
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkMode {
    pub id: Cow<'static, str>,
    pub label: Cow<'static, str>,
    #[serde(default)]
    pub description: Cow<'static, str>,
    /// Upper bound on selectable minutes.
    pub max_duration: u32,
    /// Minute step for duration selection.
    pub interval: u32,
    pub multiple_session: bool,
    #[serde(rename = "break")]
    pub has_break: bool,
}

impl WorkMode {
    /// Single continuous block, no built-in breaks.
    pub const SIMPLE_SESSION: WorkMode = WorkMode {
        id: Cow::Borrowed("simple"),
        label: Cow::Borrowed("Simple Session"),
        description: Cow::Borrowed(
            "Single, continuous session up to two hours. Ideal for quick tasks or casual study with no built-in breaks.",
        ),
        max_duration: 120,
        interval: 5,
        multiple_session: false,
        has_break: false,
    };

    /// Focus / break cycles repeated over a planned number of sessions.
    pub const BASIC_POMODORO: WorkMode = WorkMode {
        id: Cow::Borrowed("pomodoro"),
        label: Cow::Borrowed("Basic Pomodoro"),
        description: Cow::Borrowed(
            "Focus / break cycles (e.g. 25 min focus + 5 min break) repeated over several sessions.",
        ),
        max_duration: 60,
        interval: 1,
        multiple_session: true,
        has_break: true,
    };

    /// Long uninterrupted blocks of up to six hours.
    pub const DEEP_FOCUS: WorkMode = WorkMode {
        id: Cow::Borrowed("deep"),
        label: Cow::Borrowed("Deep Focus"),
        description: Cow::Borrowed("Long, uninterrupted work blocks of two to six hours."),
        max_duration: 360,
        interval: 5,
        multiple_session: false,
        has_break: false,
    };

    /// Short resets for meditation, stretching or breathing.
    pub const MINDFULNESS: WorkMode = WorkMode {
        id: Cow::Borrowed("mindfulness"),
        label: Cow::Borrowed("Mindfulness Mode"),
        description: Cow::Borrowed(
            "Short 10-15 minute sessions for meditation, stretching or breathing exercises.",
        ),
        max_duration: 15,
        interval: 1,
        multiple_session: false,
        has_break: false,
    };

    pub const ALL: [WorkMode; 4] = [
        Self::SIMPLE_SESSION,
        Self::BASIC_POMODORO,
        Self::DEEP_FOCUS,
        Self::MINDFULNESS,
    ];

    pub fn by_id(id: &str) -> Option<WorkMode> {
        Self::ALL.into_iter().find(|m| m.id == id)
    }

    /// Map a stored mode back onto its preset.
    ///
    /// Stored copies may carry stale labels or bounds; the preset with the
    /// same id wins. Unknown ids are accepted only if their bounds are usable.
    pub fn canonical(self) -> Option<WorkMode> {
        if let Some(preset) = Self::by_id(&self.id) {
            return Some(preset);
        }
        (self.interval >= 1 && self.max_duration >= self.interval).then_some(self)
    }

    /// Snap `minutes` to this mode's step and clamp it into
    /// `[interval, upper]`.
    ///
    /// `upper` is normally `max_duration`; while on a break the caller passes
    /// the break ceiling instead.
    pub fn snap_minutes(&self, minutes: u32, upper: u32) -> u32 {
        let step = self.interval.max(1);
        let snapped = ((minutes + step / 2) / step) * step;
        let snapped = snapped.max(step);
        if snapped <= upper {
            return snapped;
        }
        // Largest multiple of the step that still fits.
        ((upper / step) * step).max(step)
    }
}

impl Default for WorkMode {
    fn default() -> Self {
        Self::BASIC_POMODORO
    }
}
