//! Per-set row controller.
//!
//! Owns one set's editable draft and decides create vs. update. A draft
//! without a `record_id` persists through a bulk create; once the server
//! has assigned an id, the save action means "acknowledge and advance"
//! and field edits flow through a 1-second debounced update instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::debounce::Debounce;
use crate::api::{RecordPayload, RecordResource, WeightField};
use crate::text::{validate_decimal_number, validate_number};
use crate::workout::WeightUnit;

/// Update debounce window.
pub const UPDATE_DEBOUNCE_MS: i64 = 1000;

/// Default note for a set saved without any recorded data.
pub const SKIPPED_NOTE: &str = "Set skipped";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Reps,
    Weight,
}

/// The locally held, possibly-unpersisted record for one set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDraft {
    pub set: u32,
    pub reps: u32,
    /// Decimal-formatted string as typed; empty serializes as weight 0.
    pub weight: String,
    pub weight_unit: WeightUnit,
    pub total_time: u64,
    pub workout_detail_id: String,
    pub note: String,
    pub is_edited: bool,
    pub record_id: Option<String>,
}

/// What a save tap means for this row right now.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveAction {
    /// Already persisted: no network call, just advance progression.
    Advance { workout_detail_id: String, set: u32 },
    /// Never edited: the caller must confirm saving an empty set first.
    NeedsConfirmation,
    /// Perform a create with this payload.
    Create(RecordPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRow {
    draft: RecordDraft,
    loading: bool,
    update: Debounce,
}

impl SetRow {
    pub fn new(workout_detail_id: &str, set: u32, note: &str) -> Self {
        Self {
            draft: RecordDraft {
                set,
                reps: 0,
                weight: String::new(),
                weight_unit: WeightUnit::Kg,
                total_time: 0,
                workout_detail_id: workout_detail_id.to_string(),
                note: note.to_string(),
                is_edited: false,
                record_id: None,
            },
            loading: false,
            update: Debounce::new(UPDATE_DEBOUNCE_MS),
        }
    }

    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_persisted(&self) -> bool {
        self.draft.record_id.is_some()
    }

    /// Apply a keystroke to reps or weight. Invalid input is dropped
    /// silently: no state change, no error.
    pub fn edit_field(&mut self, field: Field, raw: &str, now: DateTime<Utc>) {
        match field {
            Field::Reps => {
                if !validate_number(raw) {
                    return;
                }
                self.draft.reps = raw.parse().unwrap_or(0);
            }
            Field::Weight => {
                if !validate_decimal_number(raw) {
                    return;
                }
                self.draft.weight = raw.to_string();
            }
        }
        self.draft.total_time = 0;
        self.draft.is_edited = true;
        self.schedule_update(now);
    }

    /// Flip kg <-> lb. Does not mark the draft edited; it only becomes a
    /// pending update when a record already exists.
    pub fn toggle_weight_unit(&mut self, now: DateTime<Utc>) {
        self.draft.weight_unit = self.draft.weight_unit.toggled();
        self.draft.total_time = 0;
        self.schedule_update(now);
    }

    /// Resolve what this row's save tap should do.
    pub fn save(&mut self) -> SaveAction {
        if self.draft.record_id.is_some() {
            return SaveAction::Advance {
                workout_detail_id: self.draft.workout_detail_id.clone(),
                set: self.draft.set,
            };
        }
        if !self.draft.is_edited {
            return SaveAction::NeedsConfirmation;
        }
        self.loading = true;
        SaveAction::Create(self.payload())
    }

    /// Confirmed "save a set with no record": default the note, mark
    /// edited, and hand back the create payload.
    pub fn confirm_skip(&mut self) -> RecordPayload {
        if self.draft.note.is_empty() {
            self.draft.note = SKIPPED_NOTE.to_string();
        }
        self.draft.is_edited = true;
        self.loading = true;
        self.payload()
    }

    /// Adopt the created record: server id plus canonical reps/weight.
    ///
    /// A local edit made while the create was in flight keeps its
    /// `is_edited`/note state and any armed debounce window, so the
    /// post-resolution draft still gets pushed as an update; only the
    /// reps/weight values yield to server canon here.
    pub fn resolve_create(&mut self, record: &RecordResource) {
        self.draft.record_id = Some(record.id.clone());
        self.draft.reps = record.attributes.reps;
        self.draft.weight = record.attributes.weight.value.to_string();
        self.loading = false;
    }

    /// Create failed: clear loading, keep the draft unpersisted. No retry.
    pub fn create_failed(&mut self) {
        self.loading = false;
    }

    /// Drain a due debounced update. The payload is built from the draft
    /// at fire time, so a burst of edits yields one call with the final
    /// values.
    pub fn poll_update(&mut self, now: DateTime<Utc>) -> Option<RecordPayload> {
        if self.draft.record_id.is_none() {
            return None;
        }
        if !self.update.fire(now) {
            return None;
        }
        self.loading = true;
        Some(self.payload())
    }

    pub fn update_resolved(&mut self) {
        self.loading = false;
    }

    pub fn update_failed(&mut self) {
        self.loading = false;
    }

    /// Reconcile an out-of-band note change from the store. Returns true
    /// when the cached copy was overwritten.
    pub fn sync_note(&mut self, external: &str, now: DateTime<Utc>) -> bool {
        if self.draft.note == external {
            return false;
        }
        self.draft.note = external.to_string();
        self.schedule_update(now);
        true
    }

    /// Disarm the debounce window; in-flight calls are the caller's to
    /// ignore.
    pub fn teardown(&mut self) {
        self.update.cancel();
    }

    pub fn update_due_at(&self) -> Option<DateTime<Utc>> {
        self.update.due_at()
    }

    fn schedule_update(&mut self, now: DateTime<Utc>) {
        if self.draft.record_id.is_some() {
            self.update.touch(now);
        }
    }

    fn payload(&self) -> RecordPayload {
        RecordPayload {
            set: self.draft.set,
            reps: self.draft.reps,
            total_time: self.draft.total_time,
            workout_detail_id: self.draft.workout_detail_id.clone(),
            note: if self.draft.note.is_empty() {
                None
            } else {
                Some(self.draft.note.clone())
            },
            weight: WeightField {
                value: self.draft.weight.parse().unwrap_or(0.0),
                unit: self.draft.weight_unit,
            },
        }
    }
}
