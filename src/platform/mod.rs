//! Platform abstraction layer
//!
//! Everything the game needs from the outside world per frame:
//! - Camera frames (also used as the render backdrop)
//! - Fingertip detection on those frames
//! - Quit signal from the window / input device
//! - Frame timing
//! - Presenting the updated snapshot

pub mod headless;
pub mod landmarks;

use std::time::Instant;

use glam::IVec2;

use crate::error::InputError;
use crate::sim::RenderSnapshot;

pub use headless::HeadlessPlatform;
pub use landmarks::{HandLandmarks, fingertips_from_hands};

/// A fingertip position in screen pixels
pub type Fingertip = IVec2;

/// One captured camera image (RGB8, row-major)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    pub index: u64,
    pub width: u32,
    pub height: u32,
    /// Empty when the source has no real image
    pub pixels: Vec<u8>,
}

/// External collaborators consumed by the frame loop
pub trait Platform {
    /// Grab the next camera frame; an error ends the session
    fn capture_frame(&mut self) -> Result<RawFrame, InputError>;

    /// All fingertips on all detected hands, possibly none
    fn detect_fingertips(&mut self, frame: &RawFrame) -> Vec<Fingertip>;

    /// Polled once per frame before capture
    fn poll_quit(&mut self) -> bool;

    /// Seconds elapsed since the previous frame
    fn frame_dt(&mut self) -> f32;

    /// Draw the backdrop frame with the updated game state on top
    fn present(&mut self, frame: &RawFrame, snapshot: &RenderSnapshot, fingertips: &[Fingertip]);
}

/// Monotonic frame timer
#[derive(Debug, Clone)]
pub struct WallClock {
    last: Instant,
    /// Upper bound on a single reported step (seconds)
    max_dt: f32,
}

impl WallClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last: Instant::now(),
            max_dt,
        }
    }

    /// Seconds since the previous call (or construction), clamped to `max_dt`
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(self.max_dt)
    }
}
