//! Sorting algorithms expressed as observable, pausable step sequences.
//!
//! A step marks visual states, optionally moves values, hands a snapshot to
//! the [`Renderer`] and then awaits the [`StepClock`]. Cancellation surfaces
//! from the clock as [`Cancelled`] and unwinds through `?` without touching the
//! store again.

use shared::domain::{AlgorithmId, Snapshot, VisualState};
use storage::SequenceStore;
use thiserror::Error;
use tracing::{debug, info};

mod algorithms;
pub mod clock;

pub use clock::{StepClock, Tick};

/// Receives a fresh snapshot after every step and once more when a run completes.
pub trait Renderer: Send + Sync {
    fn render(&self, frame: &Snapshot);
}

/// Renderer that discards every frame.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _frame: &Snapshot) {}
}

impl<F> Renderer for F
where
    F: Fn(&Snapshot) + Send + Sync,
{
    fn render(&self, frame: &Snapshot) {
        self(frame)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("run cancelled after {steps} steps")]
pub struct Cancelled {
    pub steps: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub algorithm: AlgorithmId,
    pub steps: u64,
}

pub type StepResult<T = ()> = Result<T, Cancelled>;

pub struct SortEngine<'a> {
    store: &'a mut SequenceStore,
    clock: &'a StepClock,
    renderer: &'a dyn Renderer,
    steps: u64,
}

impl<'a> SortEngine<'a> {
    pub fn new(
        store: &'a mut SequenceStore,
        clock: &'a StepClock,
        renderer: &'a dyn Renderer,
    ) -> Self {
        Self {
            store,
            clock,
            renderer,
            steps: 0,
        }
    }

    /// Runs `algorithm` over the store. Visual states are left as the last
    /// step set them; completion marking belongs to the caller.
    pub async fn sort(mut self, algorithm: AlgorithmId) -> StepResult<RunSummary> {
        debug!("sort started algorithm={algorithm} len={}", self.store.len());
        match algorithm {
            AlgorithmId::Bubble => self.bubble().await?,
            AlgorithmId::Selection => self.selection().await?,
            AlgorithmId::Insertion => self.insertion().await?,
            AlgorithmId::Merge => self.merge_sort().await?,
            AlgorithmId::Quick => self.quick_sort().await?,
            AlgorithmId::Heap => self.heap_sort().await?,
        }
        info!("sort finished algorithm={algorithm} steps={}", self.steps);
        Ok(RunSummary {
            algorithm,
            steps: self.steps,
        })
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Publishes the current sequence and waits out one interval.
    async fn step(&mut self) -> StepResult {
        self.renderer.render(&self.store.snapshot());
        self.steps += 1;
        match self.clock.wait().await {
            Tick::Ready => Ok(()),
            Tick::Cancelled => {
                debug!("step interrupted steps={}", self.steps);
                Err(Cancelled { steps: self.steps })
            }
        }
    }

    /// Two-step swap: highlight both indices, then exchange and clear them.
    async fn swap_step(&mut self, i: usize, j: usize) -> StepResult {
        self.store.mark_state(i, VisualState::Comparing);
        self.store.mark_state(j, VisualState::Comparing);
        self.step().await?;

        self.store.swap(i, j);
        self.store.mark_state(i, VisualState::Default);
        self.store.mark_state(j, VisualState::Default);
        self.step().await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
