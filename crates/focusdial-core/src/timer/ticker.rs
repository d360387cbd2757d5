//! Periodic scheduling primitive driving the countdown engine.
//!
//! A `Ticker` owns at most one Tokio task that invokes a callback once per
//! period until the callback returns [`TickFlow::Stop`] or the ticker is
//! cancelled. Without a Tokio runtime the ticker never starts, so the
//! countdown simply does not advance.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Returned by the tick callback to keep or stop the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start calling `on_tick` every period, replacing any active task.
    ///
    /// The first call happens one full period after `start`.
    pub fn start<F, Fut>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = TickFlow> + Send + 'static,
    {
        self.cancel();
        if tokio::runtime::Handle::try_current().is_err() {
            tracing::warn!("no async runtime available; countdown will not advance");
            return;
        }

        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a Tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if on_tick().await == TickFlow::Stop {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn ticks_until_stop() {
        let count = Arc::new(AtomicU32::new(0));
        let mut ticker = Ticker::new(Duration::from_secs(1));
        let c = count.clone();
        ticker.start(move || {
            let c = c.clone();
            async move {
                if c.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                    TickFlow::Stop
                } else {
                    TickFlow::Continue
                }
            }
        });

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(!ticker.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticking() {
        let count = Arc::new(AtomicU32::new(0));
        let mut ticker = Ticker::new(Duration::from_secs(1));
        let c = count.clone();
        ticker.start(move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                TickFlow::Continue
            }
        });

        time::sleep(Duration::from_millis(2_500)).await;
        ticker.cancel();
        let seen = count.load(Ordering::SeqCst);
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
        assert_eq!(seen, 2);
    }

    #[test]
    fn start_without_runtime_is_inert() {
        let mut ticker = Ticker::new(Duration::from_millis(10));
        ticker.start(|| async { TickFlow::Continue });
        assert!(!ticker.is_active());
    }
}
