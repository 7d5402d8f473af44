//! Workout prescription data types and circuit grouping.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

impl WeightUnit {
    /// The other supported unit; used by the row's unit toggle.
    pub fn toggled(self) -> Self {
        match self {
            WeightUnit::Kg => WeightUnit::Lb,
            WeightUnit::Lb => WeightUnit::Kg,
        }
    }
}

impl Default for WeightUnit {
    fn default() -> Self {
        WeightUnit::Kg
    }
}

/// Server-fetched prescription for one exercise within a workout.
///
/// `circuit` labels carry a series letter plus position, e.g. "A1", "B2".
/// Exercises sharing the same leading letter rotate together on one tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDetail {
    pub id: String,
    pub exercise_name: String,
    pub circuit: String,
    /// Target set count.
    pub sets: u32,
    /// Prescribed rep scheme, free-form ("8-12").
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub tempo: String,
    #[serde(default)]
    pub rest: String,
}

impl WorkoutDetail {
    /// Leading series letter of the circuit label, or '?' when empty.
    pub fn series(&self) -> char {
        self.circuit.chars().next().unwrap_or('?')
    }
}

/// One tab's worth of exercises, rotated round-robin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Series letter, e.g. "A".
    pub name: String,
    pub details: Vec<WorkoutDetail>,
}

impl Circuit {
    /// Tab title shown in the app bar.
    pub fn title(&self) -> String {
        format!("{} Series Exercises", self.name)
    }
}

/// Group details into circuits by the leading letter of their circuit
/// label, sorted by label so display order is stable.
pub fn group_circuits(details: &[WorkoutDetail]) -> Vec<Circuit> {
    let mut sorted: Vec<WorkoutDetail> = details.to_vec();
    sorted.sort_by(|a, b| a.circuit.cmp(&b.circuit));

    let mut circuits: Vec<Circuit> = Vec::new();
    for detail in sorted {
        let series = detail.series().to_string();
        match circuits.last_mut() {
            Some(circuit) if circuit.name == series => circuit.details.push(detail),
            _ => circuits.push(Circuit {
                name: series,
                details: vec![detail],
            }),
        }
    }
    circuits
}
