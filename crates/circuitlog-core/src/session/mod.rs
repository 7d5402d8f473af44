//! Guided-workout session engine.
//!
//! Wires the per-circuit progression, per-set row controllers, circuit
//! tabs, and the note store into one state machine. The control flow is
//! event-driven: a user action mutates local state, optionally performs
//! one network call, and every user-visible consequence comes back as an
//! [`Event`]. Serializable so drivers can persist it between turns.

mod debounce;
mod progression;
mod row;
mod tabs;

pub use debounce::Debounce;
pub use progression::{CircuitProgression, ExerciseEntry, Progress};
pub use row::{Field, RecordDraft, SaveAction, SetRow, SKIPPED_NOTE, UPDATE_DEBOUNCE_MS};
pub use tabs::{CircuitTabs, TabOutcome};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::{RecordClient, RecordPayload};
use crate::controls::AudioSink;
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::notes::NoteStore;
use crate::workout::{group_circuits, WorkoutDetail};

/// One tab's state: rotation plus a row per (exercise, set).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitState {
    /// Series letter, e.g. "A".
    pub name: String,
    progression: CircuitProgression,
    rows: Vec<SetRow>,
}

impl CircuitState {
    pub fn progression(&self) -> &CircuitProgression {
        &self.progression
    }

    pub fn rows(&self) -> &[SetRow] {
        &self.rows
    }
}

/// Result of a save tap.
#[derive(Debug, Clone)]
pub enum SaveOutcome {
    /// Saving a never-edited set: the caller must confirm
    /// ("save a set with no record?") and call again with `confirmed`.
    ConfirmationRequired,
    /// The tap was handled; these events describe what happened.
    Completed(Vec<Event>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    workout_id: String,
    circuits: Vec<CircuitState>,
    tabs: CircuitTabs,
    notes: NoteStore,
}

impl WorkoutSession {
    /// Build session state from server-fetched workout details.
    pub fn new(workout_id: &str, details: &[WorkoutDetail]) -> Self {
        let circuits: Vec<CircuitState> = group_circuits(details)
            .into_iter()
            .map(|circuit| {
                let rows = circuit
                    .details
                    .iter()
                    .flat_map(|detail| {
                        (1..=detail.sets).map(|set| SetRow::new(&detail.id, set, ""))
                    })
                    .collect();
                CircuitState {
                    progression: CircuitProgression::from_details(&circuit.details),
                    name: circuit.name,
                    rows,
                }
            })
            .collect();
        let tabs = CircuitTabs::new(circuits.iter().map(|c| c.name.clone()).collect());
        Self {
            workout_id: workout_id.to_string(),
            circuits,
            tabs,
            notes: NoteStore::new(),
        }
    }

    pub fn workout_id(&self) -> &str {
        &self.workout_id
    }

    pub fn tabs(&self) -> &CircuitTabs {
        &self.tabs
    }

    pub fn circuits(&self) -> &[CircuitState] {
        &self.circuits
    }

    pub fn row(&self, workout_detail_id: &str, set: u32) -> Option<&SetRow> {
        let (ci, ri) = self.locate(workout_detail_id, set)?;
        Some(&self.circuits[ci].rows[ri])
    }

    pub fn note(&self, workout_detail_id: &str, set: u32) -> &str {
        self.notes.get(workout_detail_id, set)
    }

    pub fn advance_tab(&mut self) -> usize {
        self.tabs.advance()
    }

    pub fn retreat_tab(&mut self) -> usize {
        self.tabs.retreat()
    }

    /// Apply a keystroke to one row's reps or weight field.
    pub fn edit_field(
        &mut self,
        workout_detail_id: &str,
        set: u32,
        field: Field,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let (ci, ri) = self.require(workout_detail_id, set)?;
        self.circuits[ci].rows[ri].edit_field(field, raw, now);
        Ok(())
    }

    pub fn toggle_weight_unit(
        &mut self,
        workout_detail_id: &str,
        set: u32,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let (ci, ri) = self.require(workout_detail_id, set)?;
        self.circuits[ci].rows[ri].toggle_weight_unit(now);
        Ok(())
    }

    /// Upsert a note (e.g. from the note modal) and reconcile it into
    /// the matching row's cached copy.
    pub fn upsert_note(
        &mut self,
        workout_detail_id: &str,
        set: u32,
        note: &str,
        now: DateTime<Utc>,
    ) {
        self.notes.upsert(workout_detail_id, set, note);
        if let Some((ci, ri)) = self.locate(workout_detail_id, set) {
            self.circuits[ci].rows[ri].sync_note(note, now);
        }
    }

    /// Handle a save tap on one row.
    ///
    /// Persistence failures do not error out: they come back as a
    /// [`Event::SaveFailed`] and the row stays retryable.
    pub async fn save(
        &mut self,
        client: &RecordClient,
        workout_detail_id: &str,
        set: u32,
        confirmed: bool,
    ) -> Result<SaveOutcome> {
        let (ci, ri) = self.require(workout_detail_id, set)?;

        match self.circuits[ci].rows[ri].save() {
            SaveAction::Advance {
                workout_detail_id,
                set,
            } => Ok(SaveOutcome::Completed(
                self.complete_set(ci, &workout_detail_id, set),
            )),
            SaveAction::NeedsConfirmation => {
                if !confirmed {
                    return Ok(SaveOutcome::ConfirmationRequired);
                }
                let payload = self.circuits[ci].rows[ri].confirm_skip();
                let note = payload.note.clone();
                let events = self.create_record(client, ci, ri, payload, note).await;
                Ok(SaveOutcome::Completed(events))
            }
            SaveAction::Create(payload) => {
                let events = self.create_record(client, ci, ri, payload, None).await;
                Ok(SaveOutcome::Completed(events))
            }
        }
    }

    /// Drain due debounced updates and push them to the server.
    /// Last write wins within each row's window.
    pub async fn flush_updates(&mut self, client: &RecordClient, now: DateTime<Utc>) -> Vec<Event> {
        let mut due: Vec<(usize, usize, String, RecordPayload)> = Vec::new();
        for (ci, circuit) in self.circuits.iter_mut().enumerate() {
            for (ri, row) in circuit.rows.iter_mut().enumerate() {
                if let Some(payload) = row.poll_update(now) {
                    if let Some(record_id) = row.draft().record_id.clone() {
                        due.push((ci, ri, record_id, payload));
                    }
                }
            }
        }

        let mut events = Vec::new();
        for (ci, ri, record_id, payload) in due {
            match client.update(&self.workout_id, &record_id, &payload).await {
                Ok(_) => {
                    self.circuits[ci].rows[ri].update_resolved();
                    events.push(Event::RecordUpdated {
                        record_id,
                        workout_detail_id: payload.workout_detail_id,
                        set: payload.set,
                        at: Utc::now(),
                    });
                }
                Err(e) => {
                    self.circuits[ci].rows[ri].update_failed();
                    events.push(Event::SaveFailed {
                        workout_detail_id: payload.workout_detail_id,
                        set: payload.set,
                        message: e.to_string(),
                        at: Utc::now(),
                    });
                }
            }
        }
        events
    }

    /// Earliest armed debounce deadline across all rows, for schedulers
    /// that want to know when to call [`flush_updates`] next.
    pub fn next_update_due(&self) -> Option<DateTime<Utc>> {
        self.circuits
            .iter()
            .flat_map(|c| c.rows.iter())
            .filter_map(|r| r.update_due_at())
            .min()
    }

    /// Confirmed end of workout: pause ambient audio, then run the
    /// end-of-workout flow. The returned flags gate routing only.
    pub async fn finish_workout(
        &mut self,
        client: &RecordClient,
        audio: &mut dyn AudioSink,
    ) -> Result<Vec<Event>> {
        audio.pause();
        let completion = client.generate_result(&self.workout_id).await?;
        Ok(vec![Event::WorkoutCompleted {
            last_of_template: completion.last_of_template,
            last_of_plan: completion.last_of_plan,
            at: Utc::now(),
        }])
    }

    /// Persist session state as a JSON snapshot.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn create_record(
        &mut self,
        client: &RecordClient,
        ci: usize,
        ri: usize,
        payload: RecordPayload,
        store_note: Option<String>,
    ) -> Vec<Event> {
        let set = payload.set;
        let workout_detail_id = payload.workout_detail_id.clone();

        let created = match client.bulk_create(&self.workout_id, &[payload]).await {
            Ok(records) => records.into_iter().find(|r| r.attributes.set == set),
            Err(e) => {
                self.circuits[ci].rows[ri].create_failed();
                return vec![Event::SaveFailed {
                    workout_detail_id,
                    set,
                    message: e.to_string(),
                    at: Utc::now(),
                }];
            }
        };

        let Some(record) = created else {
            self.circuits[ci].rows[ri].create_failed();
            return vec![Event::SaveFailed {
                workout_detail_id,
                set,
                message: format!("no created record for set {set} in response"),
                at: Utc::now(),
            }];
        };

        self.circuits[ci].rows[ri].resolve_create(&record);
        if let Some(note) = store_note {
            self.notes.upsert(&workout_detail_id, set, &note);
        }

        let mut events = vec![Event::SetSaved {
            record_id: record.id,
            workout_detail_id: workout_detail_id.clone(),
            set,
            at: Utc::now(),
        }];
        events.extend(self.complete_set(ci, &workout_detail_id, set));
        events
    }

    /// Feed a completed set into the circuit's rotation and, when the
    /// circuit finishes, into the tab controller.
    fn complete_set(&mut self, circuit_index: usize, workout_detail_id: &str, set: u32) -> Vec<Event> {
        let mut events = Vec::new();
        match self.circuits[circuit_index]
            .progression
            .on_set_completed(workout_detail_id, set)
        {
            Progress::Stale => {}
            Progress::Advanced { circuit, set } => {
                events.push(Event::SetAdvanced {
                    circuit,
                    set,
                    at: Utc::now(),
                });
            }
            Progress::CircuitFinished => {
                events.push(Event::CircuitFinished {
                    tab_index: circuit_index,
                    at: Utc::now(),
                });
                match self.tabs.on_circuit_finished(circuit_index) {
                    TabOutcome::MovedTo { index, circuit } => {
                        events.push(Event::TabChanged {
                            index,
                            circuit,
                            at: Utc::now(),
                        });
                    }
                    TabOutcome::PromptEndWorkout => {
                        events.push(Event::EndWorkoutRequested { at: Utc::now() });
                    }
                }
            }
        }
        events
    }

    fn locate(&self, workout_detail_id: &str, set: u32) -> Option<(usize, usize)> {
        for (ci, circuit) in self.circuits.iter().enumerate() {
            for (ri, row) in circuit.rows.iter().enumerate() {
                let draft = row.draft();
                if draft.workout_detail_id == workout_detail_id && draft.set == set {
                    return Some((ci, ri));
                }
            }
        }
        None
    }

    fn require(&self, workout_detail_id: &str, set: u32) -> Result<(usize, usize)> {
        self.locate(workout_detail_id, set).ok_or_else(|| {
            CoreError::Validation(ValidationError::UnknownRow {
                workout_detail_id: workout_detail_id.to_string(),
                set,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> Vec<WorkoutDetail> {
        [("10", "A1", 2), ("11", "A2", 2), ("20", "B1", 3)]
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
    fn builds_one_tab_per_series_with_a_row_per_set() {
        let session = WorkoutSession::new("9", &details());
        assert_eq!(session.tabs().len(), 2);
        assert_eq!(session.circuits()[0].name, "A");
        assert_eq!(session.circuits()[0].rows().len(), 4);
        assert_eq!(session.circuits()[1].rows().len(), 3);
        assert_eq!(
            session.circuits()[0].progression().highlighted_set("10"),
            1
        );
    }

    #[test]
    fn unknown_row_is_an_error() {
        let mut session = WorkoutSession::new("9", &details());
        let err = session
            .edit_field("10", 99, Field::Reps, "8", Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::UnknownRow { .. })
        ));
    }

    #[test]
    fn note_upsert_reconciles_into_row() {
        let mut session = WorkoutSession::new("9", &details());
        session.upsert_note("10", 1, "slow eccentric", Utc::now());
        assert_eq!(session.note("10", 1), "slow eccentric");
        assert_eq!(session.row("10", 1).unwrap().draft().note, "slow eccentric");
    }

    #[test]
    fn snapshot_round_trips() {
        use tempfile::TempDir;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let mut session = WorkoutSession::new("9", &details());
        session.upsert_note("10", 1, "a note", Utc::now());
        session
            .edit_field("10", 1, Field::Reps, "8", Utc::now())
            .unwrap();
        session.save_to(&path).unwrap();

        let loaded = WorkoutSession::load_from(&path).unwrap();
        assert_eq!(loaded.workout_id(), "9");
        assert_eq!(loaded.row("10", 1).unwrap().draft().reps, 8);
        assert_eq!(loaded.note("10", 1), "a note");
    }
}
