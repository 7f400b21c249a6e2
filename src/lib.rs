//! Fingerfall - a fingertip reflex game
//!
//! Core modules:
//! - `sim`: Game session state machine (targets, spawning, difficulty, collisions)
//! - `platform`: Camera / hand-tracking / window seam plus a headless implementation
//! - `renderer`: Render-facing geometry built from session snapshots
//! - `runner`: Frame loop tying a platform to a session
//! - `settings`: JSON-backed tuning and run options

pub mod error;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::{InputError, SessionEnd, SessionError};
pub use runner::{SessionSummary, run};
pub use settings::{DifficultyTrigger, Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Play area dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Side length of a square target
    pub const TARGET_SIZE: f32 = 30.0;
    /// Fingertip must be strictly closer than this to a target center
    pub const TOUCH_THRESHOLD: f32 = 30.0;

    /// Fall speed in pixels per reference frame
    pub const INITIAL_FALL_SPEED: f32 = 1.5;
    pub const FALL_SPEED_STEP: f32 = 0.1;

    /// Seconds between spawns
    pub const INITIAL_SPAWN_INTERVAL: f32 = 2.5;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.2;
    pub const SPAWN_INTERVAL_CEILING: f32 = 3.5;

    /// Difficulty steps fire on positive multiples of this score
    pub const DIFFICULTY_SCORE_STEP: u32 = 10;

    /// Session ends once this many missable targets escape
    pub const MISS_LIMIT: u32 = 5;

    /// Reference frame rate the fall speed is expressed against
    pub const REFERENCE_FPS: f32 = 60.0;
    pub const FRAME_DT: f32 = 1.0 / REFERENCE_FPS;
}
