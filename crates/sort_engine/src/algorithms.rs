use shared::domain::VisualState;

use crate::{SortEngine, StepResult};

impl SortEngine<'_> {
    pub(crate) async fn bubble(&mut self) -> StepResult {
        let n = self.store.len();
        for pass in 0..n.saturating_sub(1) {
            for j in 0..n - pass - 1 {
                if self.store.value(j) > self.store.value(j + 1) {
                    self.swap_step(j, j + 1).await?;
                }
            }
            self.store.mark_sorted(n - 1 - pass);
        }
        Ok(())
    }

    pub(crate) async fn selection(&mut self) -> StepResult {
        let n = self.store.len();
        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            for j in i + 1..n {
                self.store.mark_state(j, VisualState::Comparing);
                self.store.mark_state(min, VisualState::Comparing);
                self.step().await?;

                if self.store.value(j) < self.store.value(min) {
                    self.store.mark_state(min, VisualState::Default);
                    min = j;
                } else {
                    self.store.mark_state(j, VisualState::Default);
                }
            }

            if min != i {
                self.store.mark_state(min, VisualState::Default);
                self.swap_step(i, min).await?;
            }
            self.store.mark_sorted(i);
        }
        Ok(())
    }

    pub(crate) async fn insertion(&mut self) -> StepResult {
        for i in 1..self.store.len() {
            let key = self.store.value(i);
            self.store.mark_state(i, VisualState::Comparing);
            self.step().await?;

            // `hole` is the slot the key would currently occupy.
            let mut hole = i;
            while hole > 0 && self.store.value(hole - 1) > key {
                self.store.mark_state(hole - 1, VisualState::Comparing);
                self.step().await?;

                let shifted = self.store.value(hole - 1);
                self.store.set_value(hole, shifted);
                self.store.mark_state(hole - 1, VisualState::Default);
                hole -= 1;
                self.step().await?;
            }

            self.store.set_value(hole, key);
            self.store.mark_state(i, VisualState::Default);
        }
        Ok(())
    }

    /// Top-down merge sort driven by an explicit post-order work stack.
    pub(crate) async fn merge_sort(&mut self) -> StepResult {
        if self.store.len() < 2 {
            return Ok(());
        }

        let mut pending = vec![MergeTask::Split(0, self.store.len() - 1)];
        while let Some(task) = pending.pop() {
            match task {
                MergeTask::Split(left, right) if left < right => {
                    let mid = (left + right) / 2;
                    pending.push(MergeTask::Merge(left, mid, right));
                    pending.push(MergeTask::Split(mid + 1, right));
                    pending.push(MergeTask::Split(left, mid));
                }
                MergeTask::Split(..) => {}
                MergeTask::Merge(left, mid, right) => self.merge(left, mid, right).await?,
            }
        }
        Ok(())
    }

    /// Merges the sorted runs `left..=mid` and `mid+1..=right`; ties take the left run first.
    pub(crate) async fn merge(&mut self, left: usize, mid: usize, right: usize) -> StepResult {
        let lower = self.store.copy_range(left, mid);
        let upper = self.store.copy_range(mid + 1, right);
        let (mut a, mut b, mut k) = (0, 0, left);

        while a < lower.len() && b < upper.len() {
            self.store.mark_state(k, VisualState::Comparing);
            self.step().await?;

            if lower[a] <= upper[b] {
                self.store.set_value(k, lower[a]);
                a += 1;
            } else {
                self.store.set_value(k, upper[b]);
                b += 1;
            }
            self.store.mark_state(k, VisualState::Default);
            k += 1;
        }

        for &value in lower[a..].iter().chain(&upper[b..]) {
            self.store.set_value(k, value);
            k += 1;
        }

        self.step().await
    }

    pub(crate) async fn quick_sort(&mut self) -> StepResult {
        if self.store.len() < 2 {
            return Ok(());
        }

        // Right halves are pushed first so the left side is always finished first.
        let mut pending = vec![(0, self.store.len() - 1)];
        while let Some((low, high)) = pending.pop() {
            if low >= high {
                continue;
            }
            let pivot = self.partition(low, high).await?;
            pending.push((pivot + 1, high));
            if pivot > low {
                pending.push((low, pivot - 1));
            }
        }
        Ok(())
    }

    /// Lomuto partition around `high`; returns the pivot's final index.
    pub(crate) async fn partition(&mut self, low: usize, high: usize) -> StepResult<usize> {
        let pivot = self.store.value(high);
        self.store.mark_state(high, VisualState::Pivot);
        let mut boundary = low;

        for j in low..high {
            self.store.mark_state(j, VisualState::Comparing);
            self.step().await?;

            if self.store.value(j) < pivot {
                if boundary != j {
                    self.swap_step(boundary, j).await?;
                } else {
                    self.store.mark_state(j, VisualState::Default);
                }
                boundary += 1;
            } else {
                self.store.mark_state(j, VisualState::Default);
            }
        }

        self.store.mark_state(high, VisualState::Default);
        if boundary != high {
            self.swap_step(boundary, high).await?;
        }
        Ok(boundary)
    }

    pub(crate) async fn heap_sort(&mut self) -> StepResult {
        let n = self.store.len();
        for root in (0..n / 2).rev() {
            self.sift_down(n, root).await?;
        }

        for end in (1..n).rev() {
            self.swap_step(0, end).await?;
            self.store.mark_sorted(end);
            self.sift_down(end, 0).await?;
        }
        Ok(())
    }

    /// Restores the max-heap property below `root` within the first `heap_len` slots.
    async fn sift_down(&mut self, heap_len: usize, mut root: usize) -> StepResult {
        loop {
            let mut largest = root;
            for child in [2 * root + 1, 2 * root + 2] {
                if child >= heap_len {
                    continue;
                }
                self.store.mark_state(child, VisualState::Comparing);
                self.step().await?;

                if self.store.value(child) > self.store.value(largest) {
                    if largest != root {
                        self.store.mark_state(largest, VisualState::Default);
                    }
                    largest = child;
                } else {
                    self.store.mark_state(child, VisualState::Default);
                }
            }

            if largest == root {
                return Ok(());
            }
            self.swap_step(root, largest).await?;
            root = largest;
        }
    }
}

enum MergeTask {
    Split(usize, usize),
    Merge(usize, usize, usize),
}
