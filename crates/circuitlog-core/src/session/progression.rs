//! Round-robin exercise/set progression for one circuit.
//!
//! Circuit training rotates across exercises: one set of A1, one of A2,
//! back to A1. The circuit finishes when the exercise that would come
//! *next* has no remaining sets, even if others still do. That check on
//! the next candidate (not the one just finished) is deliberate and must
//! not be "fixed".

use serde::{Deserialize, Serialize};

use crate::workout::WorkoutDetail;

/// Per-exercise rotation state. At most one entry per circuit is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub workout_detail_id: String,
    /// Circuit label, e.g. "A1"; used in transition notices.
    pub circuit: String,
    /// Current set, 1-based; 0 until the rotation first reaches this entry.
    pub set: u32,
    pub total_sets: u32,
    pub active: bool,
}

/// Outcome of a completion signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Signal did not match the active entry (duplicate or late network
    /// response); state unchanged.
    Stale,
    /// Rotation moved on; `circuit`/`set` name the newly active work.
    Advanced { circuit: String, set: u32 },
    /// The next candidate has no sets left; entries were not mutated.
    CircuitFinished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitProgression {
    entries: Vec<ExerciseEntry>,
}

impl CircuitProgression {
    /// Build rotation state in display order: the first exercise starts
    /// at set 1/active, everything else at set 0/inactive.
    pub fn from_details(details: &[WorkoutDetail]) -> Self {
        let entries = details
            .iter()
            .enumerate()
            .map(|(index, detail)| ExerciseEntry {
                workout_detail_id: detail.id.clone(),
                circuit: detail.circuit.clone(),
                set: if index == 0 { 1 } else { 0 },
                total_sets: detail.sets,
                active: index == 0,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ExerciseEntry] {
        &self.entries
    }

    pub fn active_entry(&self) -> Option<&ExerciseEntry> {
        self.entries.iter().find(|e| e.active)
    }

    /// The set currently awaiting a log for this exercise, or 0 when the
    /// exercise is not the active one. Drives row highlighting.
    pub fn highlighted_set(&self, workout_detail_id: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.workout_detail_id == workout_detail_id && e.active)
            .map(|e| e.set)
            .unwrap_or(0)
    }

    /// Handle a completed set.
    ///
    /// The signal must name the active entry's `(detail, set)` exactly,
    /// otherwise it is stale and ignored. The next candidate is the
    /// successor in display order, wrapping to the front after the last
    /// entry (and when no entry is active at all).
    pub fn on_set_completed(&mut self, workout_detail_id: &str, set: u32) -> Progress {
        if self.entries.is_empty() {
            return Progress::Stale;
        }

        let active_index = self.entries.iter().position(|e| e.active);
        if let Some(index) = active_index {
            let active = &self.entries[index];
            if active.workout_detail_id != workout_detail_id || active.set != set {
                return Progress::Stale;
            }
        }

        let next_index = match active_index {
            Some(index) if index + 1 < self.entries.len() => index + 1,
            _ => 0,
        };

        let candidate = &self.entries[next_index];
        if candidate.set + 1 > candidate.total_sets {
            return Progress::CircuitFinished;
        }

        let next_set = candidate.set + 1;
        let circuit = candidate.circuit.clone();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.active = index == next_index;
            if index == next_index {
                entry.set = next_set;
            }
        }
        Progress::Advanced {
            circuit,
            set: next_set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(specs: &[(&str, &str, u32)]) -> Vec<WorkoutDetail> {
        specs
            .iter()
            .map(|(id, circuit, sets)| WorkoutDetail {
                id: id.to_string(),
                exercise_name: format!("Exercise {id}"),
                circuit: circuit.to_string(),
                sets: *sets,
                reps: String::new(),
                tempo: String::new(),
                rest: String::new(),
            })
            .collect()
    }

    #[test]
    fn first_entry_starts_active_at_set_one() {
        let p = CircuitProgression::from_details(&details(&[("a", "A1", 3), ("b", "A2", 3)]));
        assert_eq!(p.active_entry().unwrap().workout_detail_id, "a");
        assert_eq!(p.active_entry().unwrap().set, 1);
        assert_eq!(p.entries()[1].set, 0);
        assert!(!p.entries()[1].active);
    }

    #[test]
    fn stale_signal_is_noop() {
        let mut p = CircuitProgression::from_details(&details(&[("a", "A1", 3), ("b", "A2", 3)]));
        assert_eq!(p.on_set_completed("b", 1), Progress::Stale);
        assert_eq!(p.on_set_completed("a", 2), Progress::Stale);
        assert_eq!(p.active_entry().unwrap().workout_detail_id, "a");
        assert_eq!(p.active_entry().unwrap().set, 1);
    }

    #[test]
    fn two_by_two_scenario() {
        // Scenario from the superset pattern: A and B alternate, circuit
        // finishes when A would need a third set.
        let mut p = CircuitProgression::from_details(&details(&[("a", "A1", 2), ("b", "A2", 2)]));

        assert_eq!(
            p.on_set_completed("a", 1),
            Progress::Advanced {
                circuit: "A2".to_string(),
                set: 1
            }
        );
        assert_eq!(
            p.on_set_completed("b", 1),
            Progress::Advanced {
                circuit: "A1".to_string(),
                set: 2
            }
        );
        assert_eq!(
            p.on_set_completed("a", 2),
            Progress::Advanced {
                circuit: "A2".to_string(),
                set: 2
            }
        );
        assert_eq!(p.on_set_completed("b", 2), Progress::CircuitFinished);

        // No partial mutation on finish.
        assert_eq!(p.active_entry().unwrap().workout_detail_id, "b");
        assert_eq!(p.entries()[0].set, 2);
        assert_eq!(p.entries()[1].set, 2);
    }

    #[test]
    fn finish_check_hits_next_candidate_even_with_sets_left_elsewhere() {
        // B has one set, A has three. After A1 set 1 -> B set 1, B's
        // completion wraps to A (set 2, fine), then A's completion moves
        // to B which has no set 2: finished while A still has set 3.
        let mut p = CircuitProgression::from_details(&details(&[("a", "A1", 3), ("b", "A2", 1)]));
        assert!(matches!(p.on_set_completed("a", 1), Progress::Advanced { .. }));
        assert!(matches!(p.on_set_completed("b", 1), Progress::Advanced { .. }));
        assert_eq!(p.on_set_completed("a", 2), Progress::CircuitFinished);
        assert_eq!(p.entries()[0].set, 2);
    }

    #[test]
    fn no_active_entry_wraps_to_front() {
        let mut p = CircuitProgression::from_details(&details(&[("a", "A1", 2), ("b", "A2", 2)]));
        for entry in &mut p.entries {
            entry.active = false;
        }
        // Degenerate state: no stale check applies, candidate is index 0.
        assert_eq!(
            p.on_set_completed("a", 1),
            Progress::Advanced {
                circuit: "A1".to_string(),
                set: 2
            }
        );
    }

    #[test]
    fn single_exercise_cycles_itself() {
        let mut p = CircuitProgression::from_details(&details(&[("a", "A1", 2)]));
        assert_eq!(
            p.on_set_completed("a", 1),
            Progress::Advanced {
                circuit: "A1".to_string(),
                set: 2
            }
        );
        assert_eq!(p.on_set_completed("a", 2), Progress::CircuitFinished);
    }
}
