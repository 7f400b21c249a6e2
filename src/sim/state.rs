//! Game session state and core entity types
//!
//! The session exclusively owns its targets; nothing outside `sim` mutates them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Pace;
use super::snapshot::{RenderSnapshot, TargetSprite};
use super::spawn::Spawner;
use crate::consts::FRAME_DT;
use crate::settings::Tuning;

/// Target color, which also identifies its scoring category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetColor {
    Green,
    Red,
    Blue,
}

impl TargetColor {
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            TargetColor::Green => [0, 255, 0],
            TargetColor::Red => [255, 0, 0],
            TargetColor::Blue => [0, 0, 255],
        }
    }

    pub fn kind(&self) -> &'static TargetKind {
        match self {
            TargetColor::Green => &TARGET_KINDS[0],
            TargetColor::Red => &TARGET_KINDS[1],
            TargetColor::Blue => &TARGET_KINDS[2],
        }
    }
}

/// A spawnable target category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetKind {
    pub color: TargetColor,
    /// Signed score delta applied on touch
    pub value: i32,
    /// Whether escaping the screen counts as a miss
    pub is_missable: bool,
    /// Relative spawn weight
    pub weight: u32,
}

/// Fixed spawn table (9:3:2)
pub const TARGET_KINDS: [TargetKind; 3] = [
    TargetKind {
        color: TargetColor::Green,
        value: 1,
        is_missable: true,
        weight: 9,
    },
    TargetKind {
        color: TargetColor::Red,
        value: -1,
        is_missable: false,
        weight: 3,
    },
    TargetKind {
        color: TargetColor::Blue,
        value: 5,
        is_missable: true,
        weight: 2,
    },
];

/// A falling square target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub color: TargetColor,
    pub value: i32,
    pub is_missable: bool,
}

impl Target {
    pub fn new(id: u32, kind: &TargetKind, pos: Vec2, size: f32) -> Self {
        debug_assert!(size > 0.0);
        Self {
            id,
            pos,
            size,
            color: kind.color,
            value: kind.value,
            is_missable: kind.is_missable,
        }
    }

    /// Fall for `dt` seconds; `fall_speed` is pixels per reference frame
    pub fn advance(&mut self, fall_speed: f32, dt: f32) {
        self.pos.y += fall_speed * (dt / FRAME_DT);
    }

    /// Strictly below the bottom edge
    pub fn is_off_screen(&self, height: f32) -> bool {
        self.pos.y > height
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalReason {
    MissLimitReached,
}

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Terminal(TerminalReason),
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Terminal(_))
    }
}

/// Notable things that happened during one update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A fingertip claimed a target
    Touched {
        id: u32,
        color: TargetColor,
        value: i32,
        /// Index into the frame's fingertip list
        finger: usize,
    },
    /// A target fell off the bottom
    Escaped {
        id: u32,
        color: TargetColor,
        counted_as_miss: bool,
    },
    Spawned {
        id: u32,
        color: TargetColor,
    },
    DifficultyStep {
        fall_speed: f32,
        spawn_interval: f32,
    },
    MissLimitReached,
}

/// One play session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) spawner: Spawner,
    pub(crate) phase: GamePhase,
    pub(crate) score: u32,
    pub(crate) missed: u32,
    pub(crate) pace: Pace,
    /// Live targets in spawn order
    pub(crate) targets: Vec<Target>,
    pub(crate) time_since_last_spawn: f32,
    /// Score seen by the previous difficulty evaluation
    pub(crate) last_observed_score: u32,
    pub(crate) frame: u64,
    next_id: u32,
}

impl GameSession {
    /// Create a session; `seed` of `None` draws fresh entropy
    pub fn new(tuning: Tuning, seed: Option<u64>) -> Self {
        let tuning = tuning.sanitized();
        let seed = seed.unwrap_or_else(rand::random);
        log::debug!("New session (seed {})", seed);
        Self {
            pace: Pace {
                fall_speed: tuning.initial_fall_speed,
                spawn_interval: tuning.initial_spawn_interval,
            },
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            spawner: Spawner,
            phase: GamePhase::Running,
            score: 0,
            missed: 0,
            targets: Vec::new(),
            time_since_last_spawn: 0.0,
            last_observed_score: 0,
            frame: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a random target through the spawner
    pub fn spawn_target(&mut self) -> &Target {
        let id = self.next_entity_id();
        let target = self.spawner.spawn(&mut self.rng, id, &self.tuning);
        log::debug!("Spawned {:?} target {} at x={:.0}", target.color, id, target.pos.x);
        self.targets.push(target);
        &self.targets[self.targets.len() - 1]
    }

    /// Place a target of the given color at an explicit position
    pub fn place_target(&mut self, color: TargetColor, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.targets
            .push(Target::new(id, color.kind(), pos, self.tuning.target_size));
        id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn missed(&self) -> u32 {
        self.missed
    }

    pub fn fall_speed(&self) -> f32 {
        self.pace.fall_speed
    }

    pub fn spawn_interval(&self) -> f32 {
        self.pace.spawn_interval
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn time_since_last_spawn(&self) -> f32 {
        self.time_since_last_spawn
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Frames processed while running
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Render-facing view of the current state
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            targets: self
                .targets
                .iter()
                .map(|t| TargetSprite {
                    id: t.id,
                    position: t.pos,
                    size: t.size,
                    color: t.color,
                })
                .collect(),
            score: self.score,
            missed: self.missed,
            miss_limit: self.tuning.miss_limit,
            score_text: format!("Score: {}", self.score),
            missed_text: format!("Missed: {}/{}", self.missed, self.tuning.miss_limit),
            phase: self.phase,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Tuning::default(), None)
    }
}
