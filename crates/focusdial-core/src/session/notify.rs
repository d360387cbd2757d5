//! Completion notifications.
//!
//! The orchestrator owns a [`Notifier`]; front ends register sinks on it and
//! drop them with the returned [`SubscriptionId`] when they go away.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// One block finished; for streaks, `session_index` is the block that
    /// comes next.
    SessionComplete {
        worked_minutes: u64,
        session_index: u32,
        at: DateTime<Utc>,
    },
    /// The last block of a streak finished.
    StreakComplete {
        worked_minutes: u64,
        sessions: u32,
        at: DateTime<Utc>,
    },
}

impl Notification {
    pub fn streak_done(&self) -> bool {
        matches!(self, Notification::StreakComplete { .. })
    }
}

pub trait NotificationSink: Send {
    fn notify(&self, notification: &Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(&Notification) + Send,
{
    fn notify(&self, notification: &Notification) {
        self(notification)
    }
}

impl NotificationSink for mpsc::UnboundedSender<Notification> {
    fn notify(&self, notification: &Notification) {
        if self.send(notification.clone()).is_err() {
            tracing::debug!("notification receiver dropped");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Notifier {
    sinks: Vec<(SubscriptionId, Box<dyn NotificationSink>)>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sink: impl NotificationSink + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.sinks.push((id, Box::new(sink)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sid, _)| *sid != id);
        self.sinks.len() != before
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn emit(&self, notification: &Notification) {
        if self.sinks.is_empty() {
            tracing::debug!(?notification, "no notification sink registered");
        }
        for (_, sink) in &self.sinks {
            sink.notify(notification);
        }
    }
}
