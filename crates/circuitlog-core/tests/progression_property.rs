//! Property tests for the round-robin circuit rotation.

use circuitlog_core::{CircuitProgression, Progress, WorkoutDetail};
use proptest::prelude::*;

fn details(targets: &[u32]) -> Vec<WorkoutDetail> {
    targets
        .iter()
        .enumerate()
        .map(|(i, sets)| WorkoutDetail {
            id: format!("e{i}"),
            exercise_name: format!("Exercise {i}"),
            circuit: format!("A{}", i + 1),
            sets: *sets,
            reps: String::new(),
            tempo: String::new(),
            rest: String::new(),
        })
        .collect()
}

proptest! {
    /// Completing the active set always hands the rotation to the
    /// display-order successor (wrapping), bumping its set by one, and
    /// the circuit finishes exactly when that successor is out of sets.
    #[test]
    fn rotation_follows_display_order_until_successor_is_exhausted(
        targets in proptest::collection::vec(1u32..5, 1..6),
    ) {
        let mut p = CircuitProgression::from_details(&details(&targets));
        let n = targets.len();
        // Every completed set consumes capacity, so the loop is bounded.
        let budget: u32 = targets.iter().sum();

        let mut steps = 0u32;
        loop {
            let active = p.active_entry().cloned().expect("an entry is active");
            let active_index = p
                .entries()
                .iter()
                .position(|e| e.active)
                .expect("an entry is active");
            let next_index = (active_index + 1) % n;
            let successor = p.entries()[next_index].clone();

            match p.on_set_completed(&active.workout_detail_id, active.set) {
                Progress::Advanced { circuit, set } => {
                    prop_assert!(successor.set < successor.total_sets);
                    prop_assert_eq!(circuit, successor.circuit);
                    prop_assert_eq!(set, successor.set + 1);
                    let now_active = p.active_entry().unwrap();
                    prop_assert_eq!(
                        &now_active.workout_detail_id,
                        &successor.workout_detail_id
                    );
                    prop_assert_eq!(now_active.set, successor.set + 1);
                }
                Progress::CircuitFinished => {
                    prop_assert_eq!(successor.set, successor.total_sets);
                    // Finish leaves the rotation untouched.
                    prop_assert_eq!(
                        &p.active_entry().unwrap().workout_detail_id,
                        &active.workout_detail_id
                    );
                    break;
                }
                Progress::Stale => prop_assert!(false, "active signal reported stale"),
            }

            steps += 1;
            prop_assert!(steps <= budget, "rotation failed to terminate");
        }
    }

    /// A signal naming anything but the active (detail, set) pair never
    /// mutates the rotation.
    #[test]
    fn stale_signals_never_mutate(
        targets in proptest::collection::vec(1u32..5, 2..6),
        wrong_set in 2u32..10,
    ) {
        let mut p = CircuitProgression::from_details(&details(&targets));
        let before: Vec<_> = p
            .entries()
            .iter()
            .map(|e| (e.workout_detail_id.clone(), e.set, e.active))
            .collect();

        // Wrong exercise, then wrong set on the right exercise.
        prop_assert_eq!(p.on_set_completed("e1", 1), Progress::Stale);
        prop_assert_eq!(p.on_set_completed("e0", wrong_set), Progress::Stale);

        let after: Vec<_> = p
            .entries()
            .iter()
            .map(|e| (e.workout_detail_id.clone(), e.set, e.active))
            .collect();
        prop_assert_eq!(before, after);
    }
}
