//! Workout record persistence API.

mod records;

pub use records::{
    RecordAttributes, RecordClient, RecordPayload, RecordResource, WeightField, WorkoutCompletion,
};
