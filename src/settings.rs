//! Session settings
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed for reproducible runs (random when absent)
    pub seed: Option<u64>,
    /// Runs to play before exiting
    pub runs: u32,
    /// Simulated real-frame length fed to the clock (seconds)
    pub frame_dt: f32,
    /// Give up on a run after this much simulated time (seconds)
    pub max_run_seconds: f32,
    /// Let the built-in bot play
    pub autopilot: bool,
    /// Log a JSON snapshot of the final frame of every run
    pub dump_snapshot: bool,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            runs: 3,
            frame_dt: 1.0 / 60.0,
            max_run_seconds: 300.0,
            autopilot: true,
            dump_snapshot: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Maximum frames to simulate for one run
    pub fn max_frames(&self) -> u64 {
        if self.frame_dt <= 0.0 {
            return 0;
        }
        (self.max_run_seconds / self.frame_dt).ceil() as u64
    }
}
