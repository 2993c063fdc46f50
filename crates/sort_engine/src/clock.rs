//! The pacing primitive every sorting step awaits.
//!
//! Pause and cancellation are observed only inside [`StepClock::wait`]. A
//! pause requested while a delay is counting down freezes the countdown; on
//! resume the remaining portion of that interval elapses before the step
//! completes. A pause requested between steps holds the next `wait` before it
//! starts counting.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{sync::watch, time::Instant};
use tracing::debug;

/// Outcome of one [`StepClock::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Ready,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Signals {
    paused: bool,
    cancelled: bool,
}

struct ClockInner {
    interval_nanos: AtomicU64,
    signals: watch::Sender<Signals>,
}

/// Cheap to clone; all clones share interval, pause and cancellation.
#[derive(Clone)]
pub struct StepClock {
    inner: Arc<ClockInner>,
}

impl StepClock {
    pub fn new(interval: Duration) -> Self {
        let (signals, _) = watch::channel(Signals::default());
        Self {
            inner: Arc::new(ClockInner {
                interval_nanos: AtomicU64::new(duration_nanos(interval)),
                signals,
            }),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_nanos(self.inner.interval_nanos.load(Ordering::Acquire))
    }

    /// Applies from the next `wait` on; a countdown already running keeps its interval.
    pub fn set_interval(&self, interval: Duration) {
        self.inner
            .interval_nanos
            .store(duration_nanos(interval), Ordering::Release);
        debug!("step clock interval set interval_ms={}", interval.as_millis());
    }

    pub fn pause(&self) {
        self.inner.signals.send_modify(|signals| signals.paused = true);
        debug!("step clock paused");
    }

    pub fn resume(&self) {
        self.inner.signals.send_modify(|signals| signals.paused = false);
        debug!("step clock resumed");
    }

    /// Every pending and future `wait` reports [`Tick::Cancelled`] until [`StepClock::rearm`].
    pub fn cancel(&self) {
        self.inner
            .signals
            .send_modify(|signals| signals.cancelled = true);
        debug!("step clock cancelled");
    }

    /// Clears pause and cancellation ahead of a new run.
    pub fn rearm(&self) {
        self.inner
            .signals
            .send_modify(|signals| *signals = Signals::default());
    }

    pub async fn wait(&self) -> Tick {
        let mut signals = self.inner.signals.subscribe();
        if hold(&mut signals).await == Tick::Cancelled {
            return Tick::Cancelled;
        }

        let mut remaining = self.interval();
        loop {
            let started = Instant::now();
            tokio::select! {
                biased;
                changed = signals.changed() => {
                    if changed.is_err() {
                        return Tick::Cancelled;
                    }
                    remaining = remaining.saturating_sub(started.elapsed());
                    if hold(&mut signals).await == Tick::Cancelled {
                        return Tick::Cancelled;
                    }
                }
                () = tokio::time::sleep(remaining) => return Tick::Ready,
            }
        }
    }
}

/// Blocks while paused; reports cancellation as soon as it is signalled.
async fn hold(signals: &mut watch::Receiver<Signals>) -> Tick {
    let released = signals
        .wait_for(|signals| signals.cancelled || !signals.paused)
        .await
        .map(|signals| *signals);
    match released {
        Ok(signals) if !signals.cancelled => Tick::Ready,
        _ => Tick::Cancelled,
    }
}

fn duration_nanos(interval: Duration) -> u64 {
    u64::try_from(interval.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "tests/clock_tests.rs"]
mod tests;
