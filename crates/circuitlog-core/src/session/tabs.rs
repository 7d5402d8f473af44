//! Circuit tab controller.

use serde::{Deserialize, Serialize};

/// Outcome of a circuit finishing on some tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabOutcome {
    /// The last circuit finished: confirm, pause ambient audio, then run
    /// the end-of-workout flow.
    PromptEndWorkout,
    /// Moved to the next circuit tab.
    MovedTo { index: usize, circuit: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitTabs {
    /// Series letters in display order.
    circuits: Vec<String>,
    index: usize,
}

impl CircuitTabs {
    pub fn new(circuits: Vec<String>) -> Self {
        Self { circuits, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    pub fn current(&self) -> Option<&str> {
        self.circuits.get(self.index).map(String::as_str)
    }

    pub fn is_last(&self) -> bool {
        !self.circuits.is_empty() && self.index == self.circuits.len() - 1
    }

    /// Move forward one tab, clamped at the end.
    pub fn advance(&mut self) -> usize {
        if self.index + 1 < self.circuits.len() {
            self.index += 1;
        }
        self.index
    }

    /// Move back one tab, clamped at the front.
    pub fn retreat(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    /// React to the circuit on `tab_index` finishing.
    pub fn on_circuit_finished(&mut self, tab_index: usize) -> TabOutcome {
        if tab_index + 1 >= self.circuits.len() {
            return TabOutcome::PromptEndWorkout;
        }
        self.index = tab_index + 1;
        TabOutcome::MovedTo {
            index: self.index,
            circuit: self.circuits[self.index].clone(),
        }
    }
}
