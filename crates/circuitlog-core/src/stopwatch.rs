//! Rest stopwatch.
//!
//! Wall-clock based, no internal threads: the caller reads
//! `elapsed_ms()` whenever it redraws. Reset returns to zero and keeps
//! counting, matching the in-workout rest timer behavior.

use serde::{Deserialize, Serialize};

use crate::timefmt::format_time;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    /// Time accumulated across completed run segments.
    banked_ms: u64,
    /// Epoch ms when the current run segment started, if running.
    #[serde(default)]
    running_since_ms: Option<u64>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running_since_ms.is_some()
    }

    pub fn start(&mut self) {
        if self.running_since_ms.is_none() {
            self.running_since_ms = Some(now_ms());
        }
    }

    pub fn pause(&mut self) {
        if let Some(since) = self.running_since_ms.take() {
            self.banked_ms += now_ms().saturating_sub(since);
        }
    }

    /// Zero the clock and restart immediately.
    pub fn reset(&mut self) {
        self.banked_ms = 0;
        self.running_since_ms = Some(now_ms());
    }

    pub fn elapsed_ms(&self) -> u64 {
        let running = self
            .running_since_ms
            .map(|since| now_ms().saturating_sub(since))
            .unwrap_or(0);
        self.banked_ms + running
    }

    /// "MM:SS" display, minutes uncapped.
    pub fn formatted(&self) -> String {
        format_time(self.elapsed_ms(), false)
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
