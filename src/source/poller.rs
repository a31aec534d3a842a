//! Periodic fetch runner with per-resource state slots.
//!
//! A [`Poller`] owns one background task that invokes a fetch action on a
//! fixed-rate schedule and publishes the outcome into a [`PollState`] slot.
//! Each slot has exactly one writer (its poller); readers observe it through a
//! `watch` receiver.
//!
//! ```text
//!  spawn ──▶ cycle ──▶ cycle ──▶ cycle ──▶ … ──▶ shutdown
//!            t=0       t=I       t=2I
//!             │
//!             ├─ loading = true, error = None
//!             ├─ await action()
//!             ├─ Ok(v)  → data = v, error = None
//!             ├─ Err(e) → error = e (data kept)
//!             └─ loading = false
//! ```
//!
//! Ticks sit on a fixed grid measured from the first cycle's start. A tick
//! that falls while a fetch is still in flight is dropped and the next cycle
//! waits for the following grid point, so cycles of one poller never overlap
//! and writes to its slot are strictly ordered.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Message stored when a failure carries no text of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Shortest schedule a poller will run on.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Client-owned wrapper around a fetched resource.
#[derive(Debug, Clone, PartialEq)]
pub struct PollState<T> {
    /// Last successfully fetched value, kept across failed cycles.
    pub data: Option<T>,
    /// True while a cycle is in flight (and before the first completes).
    pub loading: bool,
    /// Failure message of the most recent cycle, if it failed.
    pub error: Option<String>,
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

impl<T> PollState<T> {
    /// Mark the start of a cycle.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Record a successful cycle, replacing the held value.
    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.loading = false;
    }

    /// Record a failed cycle. The previously held value is preserved.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error = Some(if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        });
        self.loading = false;
    }

    /// Finish a cycle that was abandoned without an outcome.
    pub fn settle(&mut self) {
        self.loading = false;
    }
}

/// Schedule configuration for a background fetch task.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use leanpoint_dash::Poller;
///
/// # tokio_test::block_on(async {
/// let handle = Poller::builder("status")
///     .interval(Duration::from_secs(5))
///     .build()
///     .spawn(|| async { Ok::<_, std::io::Error>(42u64) });
///
/// let mut state = handle.subscribe();
/// let ready = state.wait_for(|s| !s.loading).await.unwrap();
/// assert_eq!(ready.data, Some(42));
/// drop(ready);
/// handle.shutdown().await;
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Poller {
    name: String,
    interval: Duration,
}

impl Poller {
    /// Create a builder for a poller identified by `name` in logs.
    pub fn builder(name: impl Into<String>) -> PollerBuilder {
        PollerBuilder {
            name: name.into(),
            interval: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the background task.
    ///
    /// The first cycle runs immediately; later cycles start every `interval`
    /// measured from the first cycle's start. Must be called inside a tokio
    /// runtime.
    pub fn spawn<T, E, F, Fut>(self, action: F) -> PollerHandle<T>
    where
        T: Send + Sync + 'static,
        E: Display + Send + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (state_tx, state_rx) = watch::channel(PollState::default());
        let (stop_tx, stop_rx) = watch::channel(false);
        let refresh = Arc::new(Notify::new());

        let task = tokio::spawn(run(
            self.name.clone(),
            self.interval,
            action,
            state_tx,
            stop_rx,
            refresh.clone(),
        ));

        PollerHandle {
            name: self.name,
            state: state_rx,
            stop_tx,
            refresh,
            task: Some(task),
        }
    }
}

/// Builder for [`Poller`].
#[derive(Debug)]
pub struct PollerBuilder {
    name: String,
    interval: Option<Duration>,
}

impl PollerBuilder {
    /// Set the cycle interval (default: 5 seconds).
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn build(self) -> Poller {
        Poller {
            name: self.name,
            interval: self
                .interval
                .unwrap_or(Duration::from_secs(5))
                .max(MIN_INTERVAL),
        }
    }
}

async fn run<T, E, F, Fut>(
    name: String,
    period: Duration,
    action: F,
    state: watch::Sender<PollState<T>>,
    mut stop: watch::Receiver<bool>,
    refresh: Arc<Notify>,
) where
    E: Display,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // Index of the next tick on the `start + k * period` grid.
    let mut next_tick: u64 = 0;

    info!(poller = %name, interval_ms = period.as_millis() as u64, "poller started");

    loop {
        tokio::select! {
            biased;
            _ = stop.changed() => break,
            _ = ticker.tick() => next_tick += 1,
            _ = refresh.notified() => debug!(poller = %name, "manual refresh"),
        }

        if *stop.borrow() {
            break;
        }

        state.send_modify(PollState::begin);

        let outcome = tokio::select! {
            biased;
            _ = stop.changed() => None,
            result = action() => Some(result),
        };

        match outcome {
            Some(Ok(data)) => {
                debug!(poller = %name, "cycle succeeded");
                state.send_modify(|s| s.succeed(data));
            }
            Some(Err(e)) => {
                let message = e.to_string();
                warn!(poller = %name, error = %message, "cycle failed");
                state.send_modify(|s| s.fail(message));
            }
            None => {
                debug!(poller = %name, "in-flight cycle abandoned");
                state.send_modify(PollState::settle);
                break;
            }
        }

        // Drop grid ticks that passed while the cycle ran.
        let due = ticks_elapsed(start, period, Instant::now());
        if due > next_tick {
            debug!(poller = %name, skipped = due - next_tick, "coalesced missed ticks");
            next_tick = due;
        }
        ticker.reset_at(grid_instant(start, period, next_tick));
    }

    info!(poller = %name, "poller stopped");
}

/// Index of the first grid tick at or after `now`.
fn ticks_elapsed(start: Instant, period: Duration, now: Instant) -> u64 {
    let elapsed = now.saturating_duration_since(start).as_nanos();
    let ticks = elapsed.div_ceil(period.as_nanos().max(1));
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

fn grid_instant(start: Instant, period: Duration, tick: u64) -> Instant {
    let offset = period.as_nanos().saturating_mul(u128::from(tick));
    start + Duration::from_nanos(u64::try_from(offset).unwrap_or(u64::MAX))
}

/// Owner of a running poller.
///
/// Dropping the handle signals the task to stop; [`PollerHandle::shutdown`]
/// additionally waits for it to finish.
#[derive(Debug)]
pub struct PollerHandle<T> {
    name: String,
    state: watch::Receiver<PollState<T>>,
    stop_tx: watch::Sender<bool>,
    refresh: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl<T> PollerHandle<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the current slot contents.
    ///
    /// The returned guard holds a read lock; do not keep it across awaits.
    pub fn state(&self) -> watch::Ref<'_, PollState<T>> {
        self.state.borrow()
    }

    /// A receiver that can await slot changes.
    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.state.clone()
    }

    /// Request an immediate cycle.
    ///
    /// If a cycle is already in flight, the extra one runs right after it.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Stop the poller and wait for its task to exit.
    ///
    /// A fetch in flight is abandoned and the slot's `loading` flag cleared.
    /// Once this returns the slot is never written again.
    pub async fn shutdown(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<T> Drop for PollerHandle<T> {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
    }
}
