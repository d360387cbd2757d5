use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Whether the user is working or on a break. Stored under `workStatus`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkStatus {
    #[serde(default)]
    pub is_break: bool,
}

impl WorkStatus {
    pub const WORKING: WorkStatus = WorkStatus { is_break: false };
    pub const ON_BREAK: WorkStatus = WorkStatus { is_break: true };

    pub fn label(&self) -> &'static str {
        if self.is_break {
            "break"
        } else {
            "work"
        }
    }
}

/// Shared observable holding the current [`WorkStatus`].
///
/// Observers hold a `watch::Receiver` and are woken on every change.
#[derive(Debug)]
pub struct StatusCell {
    tx: watch::Sender<WorkStatus>,
}

impl StatusCell {
    pub fn new(initial: WorkStatus) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn get(&self) -> WorkStatus {
        *self.tx.borrow()
    }

    /// Replace the status. Returns true if it changed.
    pub fn set(&self, status: WorkStatus) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status;
            true
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkStatus> {
        self.tx.subscribe()
    }
}
