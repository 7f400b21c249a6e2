//! Render-facing view of a session
//!
//! Plain data handed to whatever draws the frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, TargetColor};

/// One target as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSprite {
    pub id: u32,
    /// Top-left corner
    pub position: Vec2,
    pub size: f32,
    pub color: TargetColor,
}

/// Fully-updated state after one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub targets: Vec<TargetSprite>,
    pub score: u32,
    pub missed: u32,
    pub miss_limit: u32,
    pub score_text: String,
    pub missed_text: String,
    pub phase: GamePhase,
}
