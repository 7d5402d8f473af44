use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every user-visible state change in the session produces an Event.
/// The driving surface (CLI, GUI shell) renders these as toasts/banners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A set record was created on the server.
    SetSaved {
        record_id: String,
        workout_detail_id: String,
        set: u32,
        at: DateTime<Utc>,
    },
    /// A debounced edit was pushed to an existing record.
    RecordUpdated {
        record_id: String,
        workout_detail_id: String,
        set: u32,
        at: DateTime<Utc>,
    },
    /// Progression moved to the next exercise in the rotation.
    /// Rendered as "Move to {circuit} set {set}".
    SetAdvanced {
        circuit: String,
        set: u32,
        at: DateTime<Utc>,
    },
    /// All sets of the circuit on this tab are done.
    CircuitFinished {
        tab_index: usize,
        at: DateTime<Utc>,
    },
    /// Moved to the next circuit tab.
    /// Rendered as "Move to {circuit} exercises".
    TabChanged {
        index: usize,
        circuit: String,
        at: DateTime<Utc>,
    },
    /// The last circuit finished; the caller should confirm before
    /// running the end-of-workout flow.
    EndWorkoutRequested { at: DateTime<Utc> },
    /// End-of-workout flow completed. The two flags gate routing only.
    WorkoutCompleted {
        last_of_template: bool,
        last_of_plan: bool,
        at: DateTime<Utc>,
    },
    /// A create or update call failed. No retry is scheduled; the user
    /// recovers by re-tapping save.
    SaveFailed {
        workout_detail_id: String,
        set: u32,
        message: String,
        at: DateTime<Utc>,
    },
}
