//! Per-(exercise, set) note store.
//!
//! Canonical note text lives here; row controllers hold cached copies
//! and reconcile against the store when it changes out of band (e.g. a
//! note edited through the note modal).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keyed note mapping. Reads of unknown keys return "".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteStore {
    /// workout_detail_id -> set -> note text.
    notes: HashMap<String, HashMap<u32, String>>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the note for one set.
    pub fn upsert(&mut self, workout_detail_id: &str, set: u32, note: &str) {
        self.notes
            .entry(workout_detail_id.to_string())
            .or_default()
            .insert(set, note.to_string());
    }

    /// Note text for one set; empty string when none was recorded.
    pub fn get(&self, workout_detail_id: &str, set: u32) -> &str {
        self.notes
            .get(workout_detail_id)
            .and_then(|sets| sets.get(&set))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_read_empty() {
        let store = NoteStore::new();
        assert_eq!(store.get("d1", 1), "");
    }

    #[test]
    fn upsert_replaces() {
        let mut store = NoteStore::new();
        store.upsert("d1", 1, "felt heavy");
        store.upsert("d1", 2, "better");
        assert_eq!(store.get("d1", 1), "felt heavy");
        assert_eq!(store.get("d1", 2), "better");

        store.upsert("d1", 1, "ok actually");
        assert_eq!(store.get("d1", 1), "ok actually");
    }

    #[test]
    fn keys_are_per_exercise() {
        let mut store = NoteStore::new();
        store.upsert("d1", 1, "a");
        assert_eq!(store.get("d2", 1), "");
    }
}
