//! # Circuitlog Core Library
//!
//! Core state management for a circuit-training guided-workout flow:
//! tabbed circuits of exercises rotated round-robin, per-set record
//! drafts persisted to a workout API, a per-set note store, a rest
//! stopwatch, and metronome volume controls.
//!
//! ## Architecture
//!
//! - **Session engine**: plain state machines driven by the caller; a
//!   user action mutates local state, performs at most one network
//!   call, and reports consequences as [`Event`]s
//! - **Record API**: async reqwest client for create/update/generate
//! - **Storage**: TOML configuration plus JSON state snapshots
//!
//! ## Key Components
//!
//! - [`WorkoutSession`]: orchestrator over rows, progression, and tabs
//! - [`CircuitProgression`]: round-robin set rotation for one circuit
//! - [`SetRow`]: one set's draft with debounced update persistence
//! - [`RecordClient`]: workout result API client

pub mod api;
pub mod config;
pub mod controls;
pub mod error;
pub mod events;
pub mod notes;
pub mod session;
pub mod stopwatch;
pub mod text;
pub mod timefmt;
pub mod workout;

pub use api::{RecordClient, RecordPayload, RecordResource, WeightField, WorkoutCompletion};
pub use config::Config;
pub use controls::{AudioSink, ControlOption, Controls, SilentSink};
pub use error::{ApiError, ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use notes::NoteStore;
pub use session::{
    CircuitProgression, CircuitTabs, ExerciseEntry, Field, Progress, SaveOutcome, SetRow,
    TabOutcome, WorkoutSession,
};
pub use stopwatch::Stopwatch;
pub use workout::{group_circuits, Circuit, WeightUnit, WorkoutDetail};
