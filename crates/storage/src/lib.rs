//! In-memory owner of the sequence being animated.
//!
//! Index arguments are preconditions: an out-of-range index means a sorting
//! routine is broken, so every accessor panics instead of returning an error.

use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::domain::{Element, Snapshot, ValueRange, VisualState};
use tracing::debug;

pub struct SequenceStore {
    elements: Vec<Element>,
    rng: StdRng,
}

impl SequenceStore {
    /// Random sequence seeded from the operating system.
    pub fn new(size: usize, range: ValueRange) -> Self {
        Self::with_rng(size, range, StdRng::from_os_rng())
    }

    /// Reproducible sequence; later regenerations continue the same stream.
    pub fn seeded(size: usize, range: ValueRange, seed: u64) -> Self {
        Self::with_rng(size, range, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: usize, range: ValueRange, rng: StdRng) -> Self {
        let mut store = Self {
            elements: Vec::with_capacity(size),
            rng,
        };
        store.regenerate(size, range);
        store
    }

    /// Store holding exactly `values`, all in the default state.
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            elements: values.into_iter().map(Element::new).collect(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replaces the sequence with `size` values drawn independently from `range`.
    ///
    /// While a run is active the store is owned by the run task, so callers
    /// cannot reach this method mid-run.
    pub fn regenerate(&mut self, size: usize, range: ValueRange) {
        self.elements.clear();
        for _ in 0..size {
            let value = self.rng.random_range(range.low()..=range.high());
            self.elements.push(Element::new(value));
        }
        debug!("sequence regenerated len={size} low={} high={}", range.low(), range.high());
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn value(&self, index: usize) -> u32 {
        self.check(index, "value");
        self.elements[index].value
    }

    pub fn state(&self, index: usize) -> VisualState {
        self.check(index, "state");
        self.elements[index].state
    }

    pub fn values(&self) -> Vec<u32> {
        self.elements.iter().map(|element| element.value).collect()
    }

    pub fn reset_states(&mut self) {
        self.mark_all(VisualState::Default);
    }

    pub fn mark_all(&mut self, state: VisualState) {
        for element in &mut self.elements {
            element.state = state;
        }
    }

    pub fn mark_sorted(&mut self, index: usize) {
        self.mark_state(index, VisualState::Sorted);
    }

    pub fn mark_state(&mut self, index: usize, state: VisualState) {
        self.check(index, "mark_state");
        self.elements[index].state = state;
    }

    /// Exchanges values only; visual states stay where they were.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.check(i, "swap");
        self.check(j, "swap");
        let held = self.elements[i].value;
        self.elements[i].value = self.elements[j].value;
        self.elements[j].value = held;
    }

    /// Overwrites one value, as shifting and merging do.
    pub fn set_value(&mut self, index: usize, value: u32) {
        self.check(index, "set_value");
        self.elements[index].value = value;
    }

    /// Copies `left..=right` out of the store.
    pub fn copy_range(&self, left: usize, right: usize) -> Vec<u32> {
        self.check(left, "copy_range");
        self.check(right, "copy_range");
        self.elements[left..=right]
            .iter()
            .map(|element| element.value)
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self.elements.as_slice())
    }

    fn check(&self, index: usize, op: &str) {
        assert!(
            index < self.elements.len(),
            "SequenceStore::{op} index {index} out of range for length {}",
            self.elements.len()
        );
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
