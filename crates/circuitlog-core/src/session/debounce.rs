//! Trailing-edge debounce primitive.
//!
//! One instance per row controller. Each touch resets the window, so a
//! burst of edits collapses into a single fire once the window has been
//! quiet; the caller builds the payload at fire time, which makes the
//! collapse last-write-wins.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debounce {
    window_ms: i64,
    #[serde(default)]
    due: Option<DateTime<Utc>>,
}

impl Debounce {
    pub fn new(window_ms: i64) -> Self {
        Self {
            window_ms,
            due: None,
        }
    }

    /// Arm (or re-arm) the window from `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.due = Some(now + Duration::milliseconds(self.window_ms));
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due
    }

    /// Disarm without firing; used on teardown.
    pub fn cancel(&mut self) {
        self.due = None;
    }

    /// True exactly once per armed window, when `now` has passed it.
    pub fn fire(&mut self, now: DateTime<Utc>) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_window() {
        let t0 = Utc::now();
        let mut d = Debounce::new(1000);
        d.touch(t0);
        assert!(!d.fire(t0 + Duration::milliseconds(999)));
        assert!(d.fire(t0 + Duration::milliseconds(1000)));
        assert!(!d.fire(t0 + Duration::milliseconds(2000)));
    }

    #[test]
    fn touch_resets_window() {
        let t0 = Utc::now();
        let mut d = Debounce::new(1000);
        d.touch(t0);
        d.touch(t0 + Duration::milliseconds(800));
        // First window's deadline passes without firing.
        assert!(!d.fire(t0 + Duration::milliseconds(1100)));
        assert!(d.fire(t0 + Duration::milliseconds(1800)));
    }

    #[test]
    fn cancel_disarms() {
        let t0 = Utc::now();
        let mut d = Debounce::new(1000);
        d.touch(t0);
        d.cancel();
        assert!(!d.is_pending());
        assert!(!d.fire(t0 + Duration::milliseconds(5000)));
    }
}
