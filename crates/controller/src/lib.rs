//! Run lifecycle for the sorting animation.
//!
//! The controller owns the sequence while idle and lends it to a spawned run
//! task while an algorithm is animating, so the sequence cannot be resized or
//! regenerated mid-run. Pause, resume and cancellation travel through the
//! shared [`StepClock`].

use std::{mem, sync::Arc, time::Duration};

use serde::Serialize;
use shared::{
    catalog::{self, AlgorithmInfo},
    domain::{AlgorithmId, RunPhase, Snapshot, ValueRange, VisualState},
    error::{ControlError, ControlRejection},
    pacing,
    protocol::RunEvent,
};
use sort_engine::{Cancelled, Renderer, RunSummary, SortEngine, StepClock};
use storage::SequenceStore;
use tokio::sync::{
    broadcast,
    oneshot::{self, error::TryRecvError},
};
use tracing::{debug, error, info, warn};

pub mod config;

pub use config::{load_settings, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunState {
    pub is_running: bool,
    pub is_paused: bool,
    pub algorithm: AlgorithmId,
    pub speed_ms: u64,
}

struct RunOutcome {
    store: SequenceStore,
    result: Result<RunSummary, Cancelled>,
}

enum RunFinished {
    Outcome(RunOutcome),
    Panicked(String),
}

enum StoreSlot {
    Resident(SequenceStore),
    Lent(oneshot::Receiver<RunFinished>),
    Vacant,
}

pub struct AnimationController {
    settings: Settings,
    range: ValueRange,
    size: usize,
    algorithm: AlgorithmId,
    active_algorithm: Option<AlgorithmId>,
    phase: RunPhase,
    clock: StepClock,
    renderer: Arc<dyn Renderer>,
    events: broadcast::Sender<RunEvent>,
    slot: StoreSlot,
    replacements: u64,
}

impl AnimationController {
    /// Builds a controller over a freshly generated sequence and renders it.
    pub fn new(settings: Settings, renderer: Arc<dyn Renderer>) -> Result<Self, ControlError> {
        let range = settings.value_range()?;
        settings.check_size(settings.array_size)?;
        let store = match settings.seed {
            Some(seed) => SequenceStore::seeded(settings.array_size, range, seed),
            None => SequenceStore::new(settings.array_size, range),
        };
        Self::with_store(settings, renderer, store)
    }

    /// Builds a controller over a caller-supplied sequence.
    pub fn with_store(
        settings: Settings,
        renderer: Arc<dyn Renderer>,
        store: SequenceStore,
    ) -> Result<Self, ControlError> {
        let range = settings.value_range()?;
        settings.check_size(store.len())?;
        if let Some(index) = store.values().iter().position(|&value| value == 0) {
            return Err(ControlError::NonPositiveValue { index });
        }
        let (events, _) = broadcast::channel(settings.event_capacity.max(1));
        let controller = Self {
            range,
            size: store.len(),
            algorithm: settings.algorithm,
            active_algorithm: None,
            phase: RunPhase::Idle,
            clock: StepClock::new(settings.interval()),
            renderer,
            events,
            slot: StoreSlot::Resident(store),
            replacements: 0,
            settings,
        };
        if let Some(frame) = controller.snapshot() {
            controller.renderer.render(&frame);
        }
        Ok(controller)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.events.subscribe()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Last observed phase; a run that finished since the previous control
    /// call is only picked up by [`AnimationController::poll`] or any control action.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn poll(&mut self) -> RunPhase {
        self.settle();
        self.phase
    }

    pub fn status_text(&self) -> &'static str {
        self.phase.status_text()
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn algorithm_info(&self) -> &'static AlgorithmInfo {
        catalog::info(self.algorithm)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn interval(&self) -> Duration {
        self.clock.interval()
    }

    pub fn run_state(&self) -> RunState {
        RunState {
            is_running: self.phase.is_active(),
            is_paused: self.phase == RunPhase::Paused,
            algorithm: self.active_algorithm.unwrap_or(self.algorithm),
            speed_ms: u64::try_from(self.clock.interval().as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Current sequence, available whenever no run holds it.
    pub fn snapshot(&self) -> Option<Snapshot> {
        match &self.slot {
            StoreSlot::Resident(store) => Some(store.snapshot()),
            StoreSlot::Lent(_) | StoreSlot::Vacant => None,
        }
    }

    /// Takes effect on the next start; an active run keeps its algorithm.
    pub fn select_algorithm(&mut self, algorithm: AlgorithmId) {
        self.algorithm = algorithm;
        debug!("algorithm selected algorithm={algorithm}");
        self.publish(RunEvent::AlgorithmSelected { algorithm });
    }

    pub fn set_size(&mut self, size: usize) -> Result<(), ControlError> {
        self.settle();
        if self.phase.is_active() {
            return self.reject(ControlError::RunActive {
                action: "change the array size",
            });
        }
        if let Err(err) = self.settings.check_size(size) {
            return self.reject(err);
        }
        self.size = size;
        self.regenerate();
        self.transition(RunPhase::Idle);
        Ok(())
    }

    /// Maps a raw slider value onto the step interval; applies from the next step.
    pub fn set_speed(&mut self, raw: u8) -> Result<Duration, ControlError> {
        match pacing::interval_for_slider(raw) {
            Ok(interval) => {
                self.set_interval(interval);
                Ok(interval)
            }
            Err(err) => self.reject(err),
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.clock.set_interval(interval);
        self.publish(RunEvent::SpeedChanged {
            interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        });
    }

    pub fn generate(&mut self) -> Result<(), ControlError> {
        self.settle();
        if self.phase.is_active() {
            return self.reject(ControlError::RunActive {
                action: "generate a new array",
            });
        }
        self.regenerate();
        self.transition(RunPhase::Idle);
        Ok(())
    }

    /// Starts a run, or resumes the current one when paused.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<(), ControlError> {
        let was_paused = self.phase == RunPhase::Paused;
        self.settle();
        match self.phase {
            RunPhase::Paused => {
                self.clock.resume();
                self.transition(RunPhase::Running);
                Ok(())
            }
            RunPhase::Running => self.reject(ControlError::InvalidTransition {
                action: "start",
                phase: self.phase,
            }),
            // The paused run finished before the pause reached the clock.
            RunPhase::Idle | RunPhase::Completed | RunPhase::Errored if was_paused => {
                debug!("paused run already ended phase={}", self.phase);
                Ok(())
            }
            RunPhase::Idle | RunPhase::Completed | RunPhase::Errored => {
                self.launch();
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) -> Result<(), ControlError> {
        self.settle();
        if self.phase != RunPhase::Running {
            return self.reject(ControlError::InvalidTransition {
                action: "pause",
                phase: self.phase,
            });
        }
        self.clock.pause();
        self.transition(RunPhase::Paused);
        Ok(())
    }

    /// Cancels any active run, waits for it to unwind, then regenerates.
    pub async fn reset(&mut self) -> Result<(), ControlError> {
        self.settle();
        if self.phase == RunPhase::Idle {
            return self.reject(ControlError::InvalidTransition {
                action: "reset",
                phase: self.phase,
            });
        }
        if self.phase.is_active() {
            self.clock.cancel();
            self.wait_for_run().await;
        }
        self.clock.rearm();
        self.regenerate();
        self.transition(RunPhase::Idle);
        Ok(())
    }

    /// Waits until the active run (if any) finishes and returns the resulting phase.
    pub async fn wait_for_run(&mut self) -> RunPhase {
        if let StoreSlot::Lent(done) = &mut self.slot {
            let finished = done
                .await
                .unwrap_or_else(|_| RunFinished::Panicked("run supervisor dropped".to_string()));
            self.finish(finished);
        }
        self.phase
    }

    fn launch(&mut self) {
        let store = match mem::replace(&mut self.slot, StoreSlot::Vacant) {
            StoreSlot::Resident(store) => store,
            StoreSlot::Lent(_) | StoreSlot::Vacant => {
                warn!("no resident sequence at start; generating a fresh one");
                self.fresh_store()
            }
        };

        let algorithm = self.algorithm;
        self.active_algorithm = Some(algorithm);
        self.clock.rearm();

        let (done_tx, done_rx) = oneshot::channel();
        let run = tokio::spawn(run_sort(
            store,
            algorithm,
            self.clock.clone(),
            Arc::clone(&self.renderer),
            self.events.clone(),
        ));
        let events = self.events.clone();
        tokio::spawn(async move {
            let finished = match run.await {
                Ok(outcome) => RunFinished::Outcome(outcome),
                Err(join_error) => {
                    let message = join_error.to_string();
                    error!("sort run failed algorithm={algorithm} error={message}");
                    let _ = events.send(RunEvent::Failed {
                        algorithm,
                        message: message.clone(),
                    });
                    RunFinished::Panicked(message)
                }
            };
            let _ = done_tx.send(finished);
        });

        self.slot = StoreSlot::Lent(done_rx);
        info!("run started algorithm={algorithm} len={}", self.size);
        self.transition(RunPhase::Running);
    }

    /// Picks up a run that has already finished without blocking.
    fn settle(&mut self) {
        let StoreSlot::Lent(done) = &mut self.slot else {
            return;
        };
        match done.try_recv() {
            Ok(finished) => self.finish(finished),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                self.finish(RunFinished::Panicked("run supervisor dropped".to_string()))
            }
        }
    }

    fn finish(&mut self, finished: RunFinished) {
        self.active_algorithm = None;
        match finished {
            RunFinished::Outcome(RunOutcome {
                store,
                result: Ok(summary),
            }) => {
                self.slot = StoreSlot::Resident(store);
                info!(
                    "run completed algorithm={} steps={}",
                    summary.algorithm, summary.steps
                );
                self.transition(RunPhase::Completed);
            }
            RunFinished::Outcome(RunOutcome {
                store,
                result: Err(cancelled),
            }) => {
                self.slot = StoreSlot::Resident(store);
                info!("run cancelled steps={}", cancelled.steps);
                self.transition(RunPhase::Idle);
            }
            RunFinished::Panicked(message) => {
                warn!("replacing sequence lost with failed run: {message}");
                self.slot = StoreSlot::Resident(self.fresh_store());
                if let Some(frame) = self.snapshot() {
                    self.renderer.render(&frame);
                }
                self.transition(RunPhase::Errored);
            }
        }
    }

    fn regenerate(&mut self) {
        match &mut self.slot {
            StoreSlot::Resident(store) => store.regenerate(self.size, self.range),
            StoreSlot::Lent(_) | StoreSlot::Vacant => return,
        }
        if let Some(frame) = self.snapshot() {
            self.renderer.render(&frame);
        }
        self.publish(RunEvent::Regenerated { len: self.size });
    }

    /// Seeded stores advance the seed per replacement so a lost sequence never comes back.
    fn fresh_store(&mut self) -> SequenceStore {
        self.replacements += 1;
        match self.settings.seed {
            Some(seed) => SequenceStore::seeded(
                self.size,
                self.range,
                seed.wrapping_add(self.replacements),
            ),
            None => SequenceStore::new(self.size, self.range),
        }
    }

    fn transition(&mut self, phase: RunPhase) {
        if self.phase == phase {
            return;
        }
        debug!("phase transition from={} to={phase}", self.phase);
        self.phase = phase;
        self.publish(RunEvent::status(phase));
    }

    fn reject<T>(&self, err: ControlError) -> Result<T, ControlError> {
        warn!("control action rejected phase={} error={err}", self.phase);
        self.publish(RunEvent::Rejected(ControlRejection::from(&err)));
        Err(err)
    }

    fn publish(&self, event: RunEvent) {
        let _ = self.events.send(event);
    }
}

impl Drop for AnimationController {
    fn drop(&mut self) {
        if matches!(self.slot, StoreSlot::Lent(_)) {
            self.clock.cancel();
        }
    }
}

async fn run_sort(
    mut store: SequenceStore,
    algorithm: AlgorithmId,
    clock: StepClock,
    renderer: Arc<dyn Renderer>,
    events: broadcast::Sender<RunEvent>,
) -> RunOutcome {
    store.reset_states();
    let result = SortEngine::new(&mut store, &clock, renderer.as_ref())
        .sort(algorithm)
        .await;

    let event = match &result {
        Ok(summary) => {
            store.mark_all(VisualState::Sorted);
            renderer.render(&store.snapshot());
            RunEvent::Completed {
                algorithm,
                steps: summary.steps,
            }
        }
        Err(cancelled) => RunEvent::Cancelled {
            algorithm,
            steps: cancelled.steps,
        },
    };
    let _ = events.send(event);
    RunOutcome { store, result }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
