//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Input arrives as a fingertip list and a frame duration
//! - Output is a render snapshot plus per-frame events
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{first_touching, is_touching};
pub use difficulty::{DifficultyController, Pace};
pub use snapshot::{RenderSnapshot, TargetSprite};
pub use spawn::Spawner;
pub use state::{
    GameEvent, GamePhase, GameSession, TARGET_KINDS, Target, TargetColor, TargetKind,
    TerminalReason,
};
pub use tick::{TickInput, tick};
