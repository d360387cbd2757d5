//! Async driver for a [`SessionOrchestrator`].
//!
//! The orchestrator sits behind one `tokio::sync::Mutex`. The ticker task
//! and every user command take that lock, so a command never interleaves
//! with half of a tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use super::orchestrator::SessionOrchestrator;
use crate::clock::Clock;
use crate::events::Event;
use crate::storage::KvBackend;
use crate::timer::{TickFlow, Ticker};

pub struct SessionRunner<B: KvBackend, C: Clock> {
    inner: Arc<Mutex<SessionOrchestrator<B, C>>>,
    ticker: Ticker,
}

impl<B, C> SessionRunner<B, C>
where
    B: KvBackend + 'static,
    C: Clock + 'static,
{
    pub fn new(orchestrator: SessionOrchestrator<B, C>, tick_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(orchestrator)),
            ticker: Ticker::new(tick_interval),
        }
    }

    /// Shared handle to the orchestrator, for observers that outlive a
    /// single command.
    pub fn handle(&self) -> Arc<Mutex<SessionOrchestrator<B, C>>> {
        self.inner.clone()
    }

    pub async fn lock(&self) -> MutexGuard<'_, SessionOrchestrator<B, C>> {
        self.inner.lock().await
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Start the countdown and the ticker behind it.
    pub async fn start(&mut self) -> Option<Event> {
        let (event, running) = {
            let mut orchestrator = self.inner.lock().await;
            let event = orchestrator.start();
            (event, orchestrator.is_running())
        };
        if running && event.is_some() {
            let inner = self.inner.clone();
            self.ticker.start(move || {
                let inner = inner.clone();
                async move {
                    let mut orchestrator = inner.lock().await;
                    orchestrator.tick();
                    if orchestrator.is_running() {
                        TickFlow::Continue
                    } else {
                        TickFlow::Stop
                    }
                }
            });
        }
        event
    }

    pub async fn pause(&mut self) -> Option<Event> {
        self.ticker.cancel();
        self.inner.lock().await.pause()
    }

    pub async fn reset(&mut self) -> Option<Event> {
        self.ticker.cancel();
        self.inner.lock().await.reset()
    }
}
