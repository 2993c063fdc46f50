//! Static descriptions shown next to the visualization.

use serde::Serialize;

use crate::domain::AlgorithmId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

const BUBBLE: AlgorithmInfo = AlgorithmInfo {
    name: "Bubble Sort",
    description: "Bubble Sort repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order.",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
};

const SELECTION: AlgorithmInfo = AlgorithmInfo {
    name: "Selection Sort",
    description: "Selection Sort finds the minimum element and places it at the beginning, then repeats for the remaining unsorted portion.",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
};

const INSERTION: AlgorithmInfo = AlgorithmInfo {
    name: "Insertion Sort",
    description: "Insertion Sort builds the sorted array one item at a time by inserting each element into its proper position.",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
};

const MERGE: AlgorithmInfo = AlgorithmInfo {
    name: "Merge Sort",
    description: "Merge Sort divides the array into halves, sorts them separately, then merges the sorted halves back together.",
    time_complexity: "O(n log n)",
    space_complexity: "O(n)",
};

const QUICK: AlgorithmInfo = AlgorithmInfo {
    name: "Quick Sort",
    description: "Quick Sort selects a pivot element and partitions the array around it, then recursively sorts the partitions.",
    time_complexity: "O(n log n)",
    space_complexity: "O(log n)",
};

const HEAP: AlgorithmInfo = AlgorithmInfo {
    name: "Heap Sort",
    description: "Heap Sort builds a max heap from the array, then repeatedly extracts the maximum element to build the sorted array.",
    time_complexity: "O(n log n)",
    space_complexity: "O(1)",
};

pub fn info(algorithm: AlgorithmId) -> &'static AlgorithmInfo {
    match algorithm {
        AlgorithmId::Bubble => &BUBBLE,
        AlgorithmId::Selection => &SELECTION,
        AlgorithmId::Insertion => &INSERTION,
        AlgorithmId::Merge => &MERGE,
        AlgorithmId::Quick => &QUICK,
        AlgorithmId::Heap => &HEAP,
    }
}
