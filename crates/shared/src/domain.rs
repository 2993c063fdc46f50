use std::{fmt, ops::Deref, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ControlError;

/// Role an element plays in the step currently on screen.
///
/// Purely presentational; it never takes part in ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    #[default]
    Default,
    Comparing,
    Sorted,
    Pivot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    pub value: u32,
    pub state: VisualState,
}

impl Element {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            state: VisualState::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 6] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Merge,
        AlgorithmId::Quick,
        AlgorithmId::Heap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Merge => "merge",
            AlgorithmId::Quick => "quick",
            AlgorithmId::Heap => "heap",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = ControlError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase();
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted || wanted == format!("{}sort", id.as_str()))
            .ok_or_else(|| ControlError::UnknownAlgorithm(raw.trim().to_string()))
    }
}

/// Lifecycle of the animation controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
    Errored,
}

impl RunPhase {
    /// A run task exists (possibly suspended).
    pub fn is_active(self) -> bool {
        matches!(self, RunPhase::Running | RunPhase::Paused)
    }

    pub fn status_text(self) -> &'static str {
        match self {
            RunPhase::Idle => "Ready",
            RunPhase::Running => "Sorting...",
            RunPhase::Paused => "Paused",
            RunPhase::Completed => "Completed!",
            RunPhase::Errored => "Error occurred",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Running => "running",
            RunPhase::Paused => "paused",
            RunPhase::Completed => "completed",
            RunPhase::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// Inclusive bounds for generated element values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    low: u32,
    high: u32,
}

impl ValueRange {
    pub fn new(low: u32, high: u32) -> Result<Self, ControlError> {
        if low == 0 || low > high {
            return Err(ControlError::InvalidValueRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { low: 10, high: 359 }
    }
}

/// Read-only copy of the sequence handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Arc<[Element]>);

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

impl Snapshot {
    pub fn values(&self) -> Vec<u32> {
        self.0.iter().map(|element| element.value).collect()
    }

    pub fn states(&self) -> Vec<VisualState> {
        self.0.iter().map(|element| element.state).collect()
    }

    pub fn is_sorted(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0].value <= pair[1].value)
    }
}

impl From<&[Element]> for Snapshot {
    fn from(elements: &[Element]) -> Self {
        Self(Arc::from(elements))
    }
}

impl Deref for Snapshot {
    type Target = [Element];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
