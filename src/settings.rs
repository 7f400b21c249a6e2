//! Game settings and tuning
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// When a difficulty step fires for a score that is a multiple of the step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTrigger {
    /// Once per change of the observed score onto a multiple
    #[default]
    Edge,
    /// Every frame the score sits on a multiple
    Level,
}

impl DifficultyTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTrigger::Edge => "edge",
            DifficultyTrigger::Level => "level",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "edge" => Some(DifficultyTrigger::Edge),
            "level" => Some(DifficultyTrigger::Level),
            _ => None,
        }
    }
}

/// Gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub width: f32,
    pub height: f32,
    pub target_size: f32,
    pub touch_threshold: f32,

    pub initial_fall_speed: f32,
    pub fall_speed_step: f32,

    pub initial_spawn_interval: f32,
    pub spawn_interval_step: f32,
    pub spawn_interval_ceiling: f32,

    pub difficulty_score_step: u32,
    pub difficulty_trigger: DifficultyTrigger,

    pub miss_limit: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            target_size: TARGET_SIZE,
            touch_threshold: TOUCH_THRESHOLD,

            initial_fall_speed: INITIAL_FALL_SPEED,
            fall_speed_step: FALL_SPEED_STEP,

            initial_spawn_interval: INITIAL_SPAWN_INTERVAL,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            spawn_interval_ceiling: SPAWN_INTERVAL_CEILING,

            difficulty_score_step: DIFFICULTY_SCORE_STEP,
            difficulty_trigger: DifficultyTrigger::Edge,

            miss_limit: MISS_LIMIT,
        }
    }
}

impl Tuning {
    /// Replace values that would break session invariants with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.width > 0.0) || !(self.height > 0.0) {
            log::warn!(
                "Invalid play area {}x{}, using {}x{}",
                self.width,
                self.height,
                defaults.width,
                defaults.height
            );
            self.width = defaults.width;
            self.height = defaults.height;
        }
        if !(self.target_size > 0.0) || self.target_size > self.width {
            log::warn!("Invalid target size {}, using {}", self.target_size, defaults.target_size);
            self.target_size = defaults.target_size;
        }
        if !(self.touch_threshold > 0.0) {
            log::warn!(
                "Invalid touch threshold {}, using {}",
                self.touch_threshold,
                defaults.touch_threshold
            );
            self.touch_threshold = defaults.touch_threshold;
        }
        if !(self.initial_fall_speed > 0.0) || !(self.fall_speed_step >= 0.0) {
            log::warn!("Invalid fall speed tuning, using defaults");
            self.initial_fall_speed = defaults.initial_fall_speed;
            self.fall_speed_step = defaults.fall_speed_step;
        }
        if !(self.initial_spawn_interval > 0.0)
            || !(self.spawn_interval_step >= 0.0)
            || !(self.spawn_interval_ceiling >= self.initial_spawn_interval)
        {
            log::warn!("Invalid spawn interval tuning, using defaults");
            self.initial_spawn_interval = defaults.initial_spawn_interval;
            self.spawn_interval_step = defaults.spawn_interval_step;
            self.spawn_interval_ceiling = defaults.spawn_interval_ceiling;
        }
        if self.difficulty_score_step == 0 {
            log::warn!("Difficulty score step of 0, using {}", defaults.difficulty_score_step);
            self.difficulty_score_step = defaults.difficulty_score_step;
        }
        if self.miss_limit == 0 {
            log::warn!("Miss limit of 0, using {}", defaults.miss_limit);
            self.miss_limit = defaults.miss_limit;
        }

        self
    }
}

/// Run options plus tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    /// RNG seed; fresh entropy when absent
    pub seed: Option<u64>,
    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,
    /// Pace the headless loop to the reference frame rate
    pub realtime: bool,
    /// Draw fingertip markers in the frame geometry
    pub show_fingertips: bool,
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        Self::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Could not parse {}: {}; using defaults", path.display(), e);
            Self::default()
        })
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.sanitized();
        log::info!("Loaded settings (trigger: {})", settings.tuning.difficulty_trigger.as_str());
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
