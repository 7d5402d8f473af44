//! Workout footer controls: option-sheet items, the metronome volume
//! level, and the boundary trait for the external audio service.

use serde::{Deserialize, Serialize};

/// An item in the controls option sheet. The slider variant carries its
/// current value; action items fire on selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlOption {
    Action { label: String },
    Slider { label: String, value: u32 },
}

/// Boundary to the platform audio service (metronome playback).
/// Implementations live outside this crate; tests use [`SilentSink`].
pub trait AudioSink {
    fn play(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// `fraction` is 0.0..=1.0.
    fn set_volume(&mut self, fraction: f64);
}

/// No-op sink for tests and headless drivers.
#[derive(Debug, Default)]
pub struct SilentSink {
    pub paused: bool,
    pub volume: f64,
}

impl AudioSink for SilentSink {
    fn play(&mut self) {
        self.paused = false;
    }
    fn pause(&mut self) {
        self.paused = true;
    }
    fn resume(&mut self) {
        self.paused = false;
    }
    fn stop(&mut self) {
        self.paused = true;
    }
    fn set_volume(&mut self, fraction: f64) {
        self.volume = fraction;
    }
}

pub const MAX_METRONOME_LEVEL: u32 = 10;
pub const DEFAULT_METRONOME_LEVEL: u32 = 3;

/// Map a 0-10 volume level onto the audio service's 0.0-1.0 range.
pub fn volume_fraction(level: u32) -> f64 {
    f64::from(level.min(MAX_METRONOME_LEVEL)) / f64::from(MAX_METRONOME_LEVEL)
}

/// Footer controls state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Controls {
    pub metronome_level: u32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            metronome_level: DEFAULT_METRONOME_LEVEL,
        }
    }
}

impl Controls {
    /// Items for the options sheet.
    pub fn options(&self) -> Vec<ControlOption> {
        vec![
            ControlOption::Action {
                label: "Search Workout".to_string(),
            },
            ControlOption::Action {
                label: "Workout History".to_string(),
            },
            ControlOption::Action {
                label: "End Workout".to_string(),
            },
        ]
    }

    /// Items for the volume sheet.
    pub fn volume_options(&self) -> Vec<ControlOption> {
        vec![ControlOption::Slider {
            label: "Metronome".to_string(),
            value: self.metronome_level,
        }]
    }

    /// Set the metronome level and push it to the audio service.
    pub fn set_metronome_level(&mut self, level: u32, sink: &mut dyn AudioSink) {
        self.metronome_level = level.min(MAX_METRONOME_LEVEL);
        sink.set_volume(volume_fraction(self.metronome_level));
    }
}
