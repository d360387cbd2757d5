//! Session layer: work/break status, completion bookkeeping and the async
//! driver around the countdown.

mod notify;
mod orchestrator;
mod runner;
mod status;

pub use notify::{Notification, NotificationSink, Notifier, SubscriptionId};
pub use orchestrator::{SessionOrchestrator, SessionSnapshot, MAX_SESSION_COUNT};
pub use runner::SessionRunner;
pub use status::{StatusCell, WorkStatus};
