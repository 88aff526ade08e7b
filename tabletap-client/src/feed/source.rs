//! Change sources
//!
//! Some deployments poll on a timer, others get push notifications
//! from the backend. Both are hints that backend state may have moved;
//! the reconciliation in [`LiveOrderFeed`](super::LiveOrderFeed) is
//! written once and fed by either implementation.

use super::LiveOrderFeed;
use crate::config::{ClientConfig, FeedRole};
use async_trait::async_trait;
use shared::message::ChangeNotification;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

/// Why a refresh is being triggered
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeHint {
    /// Poll timer elapsed
    Tick,
    /// The backend pushed a change notification
    Notification(ChangeNotification),
}

/// A stream of hints that backend state may have changed
#[async_trait]
pub trait ChangeSource: Send {
    /// Wait for the next hint; `None` means the source is exhausted
    /// and the feed worker should stop
    async fn next_change(&mut self) -> Option<ChangeHint>;
}

/// Pauses and resumes a [`PollingSource`] from outside the worker
///
/// Mirrors the dashboards skipping refreshes while their tab is
/// hidden and resuming when it regains visibility.
#[derive(Clone)]
pub struct PauseHandle(Arc<AtomicBool>);

impl PauseHandle {
    pub fn pause(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Timer-based change source
pub struct PollingSource {
    interval: tokio::time::Interval,
    paused: Arc<AtomicBool>,
}

impl PollingSource {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        // A stalled consumer should not cause a burst of catch-up polls
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        Self {
            interval,
            paused: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Polling source with the configured interval for a staff role
    pub fn for_role(config: &ClientConfig, role: FeedRole) -> Self {
        Self::new(config.refresh_interval(role))
    }

    /// Handle for pausing/resuming this source
    pub fn pause_handle(&self) -> PauseHandle {
        PauseHandle(self.paused.clone())
    }
}

#[async_trait]
impl ChangeSource for PollingSource {
    async fn next_change(&mut self) -> Option<ChangeHint> {
        loop {
            self.interval.tick().await;
            // Swallow ticks while paused; the first tick after resume
            // refreshes as usual
            if !self.paused.load(Ordering::SeqCst) {
                return Some(ChangeHint::Tick);
            }
        }
    }
}

/// Push-based change source fed by backend notifications
pub struct PushSource {
    rx: mpsc::UnboundedReceiver<ChangeNotification>,
}

impl PushSource {
    pub fn new(rx: mpsc::UnboundedReceiver<ChangeNotification>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl ChangeSource for PushSource {
    async fn next_change(&mut self) -> Option<ChangeHint> {
        self.rx.recv().await.map(ChangeHint::Notification)
    }
}

/// Drives a feed from a change source until shutdown
///
/// One initial refresh runs before the loop so a freshly opened view
/// is populated without waiting for the first hint.
pub struct FeedWorker {
    feed: Arc<Mutex<LiveOrderFeed>>,
    source: Box<dyn ChangeSource>,
    shutdown: CancellationToken,
}

impl FeedWorker {
    pub fn new(
        feed: Arc<Mutex<LiveOrderFeed>>,
        source: Box<dyn ChangeSource>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            feed,
            source,
            shutdown,
        }
    }

    /// Run until the token is cancelled or the source ends
    ///
    /// Sync failures are logged and swallowed: the feed keeps showing
    /// its last good state and the next hint retries.
    pub async fn run(mut self) {
        tracing::debug!("Feed worker started");

        if let Err(err) = self.feed.lock().await.refresh().await {
            tracing::warn!(error = %err, "Initial feed refresh failed");
        }

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::debug!("Feed worker stopping on shutdown");
                    break;
                }
                hint = self.source.next_change() => {
                    let Some(hint) = hint else {
                        tracing::debug!("Change source closed, feed worker stopping");
                        break;
                    };
                    if let Err(err) = self.feed.lock().await.refresh().await {
                        tracing::warn!(error = %err, hint = ?hint, "Feed refresh failed, keeping last state");
                    }
                }
            }
        }
    }
}
