//! Headless platform with a simulated player
//!
//! No camera and no window: frames are blank, and a simulated hand chases
//! whatever it saw in the last presented snapshot, much like a human would.

use std::time::Duration;

use glam::Vec2;

use super::{Fingertip, HandLandmarks, Platform, RawFrame, WallClock, fingertips_from_hands};
use crate::consts::FRAME_DT;
use crate::error::InputError;
use crate::renderer::{self, FrameGeometry};
use crate::settings::Settings;
use crate::sim::{RenderSnapshot, TargetColor};

/// Fingertip offsets from the index tip (pixels): middle, ring, pinky, thumb
const FINGER_OFFSETS: [Vec2; 4] = [
    Vec2::new(22.0, -4.0),
    Vec2::new(42.0, 4.0),
    Vec2::new(60.0, 18.0),
    Vec2::new(-38.0, 40.0),
];

/// Headless run options
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub width: u32,
    pub height: u32,
    /// Request quit after this many captured frames
    pub max_frames: Option<u64>,
    /// Make the capture of this frame index fail
    pub fail_capture_at: Option<u64>,
    /// Sleep between frames and report wall-clock time
    pub realtime: bool,
    /// Simulated hand speed (pixels per second); `None` keeps the hand out of view
    pub hand_speed: Option<f32>,
    pub show_fingertips: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: crate::consts::SCREEN_WIDTH as u32,
            height: crate::consts::SCREEN_HEIGHT as u32,
            max_frames: None,
            fail_capture_at: None,
            realtime: false,
            hand_speed: Some(900.0),
            show_fingertips: false,
        }
    }
}

impl HeadlessConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.tuning.width as u32,
            height: settings.tuning.height as u32,
            max_frames: settings.max_frames,
            realtime: settings.realtime,
            show_fingertips: settings.show_fingertips,
            ..Default::default()
        }
    }
}

/// Simulated camera, hand tracker and window
#[derive(Debug)]
pub struct HeadlessPlatform {
    config: HeadlessConfig,
    clock: Option<WallClock>,
    frames_captured: u64,
    /// Index fingertip position (pixels)
    hand: Vec2,
    last_dt: f32,
    /// Geometry of the most recent presented frame
    last_geometry: FrameGeometry,
    last_snapshot: Option<RenderSnapshot>,
}

impl HeadlessPlatform {
    pub fn new(config: HeadlessConfig) -> Self {
        let clock = config.realtime.then(|| WallClock::new(0.1));
        let hand = Vec2::new(config.width as f32 / 2.0, config.height as f32 * 0.8);
        Self {
            config,
            clock,
            frames_captured: 0,
            hand,
            last_dt: FRAME_DT,
            last_geometry: FrameGeometry::default(),
            last_snapshot: None,
        }
    }

    pub fn frames_captured(&self) -> u64 {
        self.frames_captured
    }

    pub fn hand_position(&self) -> Vec2 {
        self.hand
    }

    pub fn last_geometry(&self) -> &FrameGeometry {
        &self.last_geometry
    }

    pub fn last_snapshot(&self) -> Option<&RenderSnapshot> {
        self.last_snapshot.as_ref()
    }

    fn landmarks(&self) -> HandLandmarks {
        let size = Vec2::new(self.config.width as f32, self.config.height as f32);
        let index = self.hand / size;
        let offset = |o: Vec2| (self.hand + o) / size;
        HandLandmarks::from_tips(
            index,
            [
                index,
                offset(FINGER_OFFSETS[0]),
                offset(FINGER_OFFSETS[1]),
                offset(FINGER_OFFSETS[2]),
                offset(FINGER_OFFSETS[3]),
            ],
        )
    }

    /// Steer toward the lowest missable target that is already on screen
    fn steer(&mut self, snapshot: &RenderSnapshot) {
        let Some(speed) = self.config.hand_speed else {
            return;
        };

        let goal = snapshot
            .targets
            .iter()
            .filter(|t| t.color != TargetColor::Red && t.position.y + t.size >= 0.0)
            .max_by(|a, b| {
                a.position
                    .y
                    .partial_cmp(&b.position.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|t| t.position + Vec2::splat(t.size / 2.0));

        if let Some(goal) = goal {
            let to_goal = goal - self.hand;
            let max_step = speed * self.last_dt;
            self.hand += to_goal.clamp_length_max(max_step);
        }
    }
}

impl Platform for HeadlessPlatform {
    fn capture_frame(&mut self) -> Result<RawFrame, InputError> {
        let index = self.frames_captured;
        if self.config.fail_capture_at == Some(index) {
            return Err(InputError::CaptureFailed { frame: index });
        }
        self.frames_captured += 1;
        Ok(RawFrame {
            index,
            width: self.config.width,
            height: self.config.height,
            pixels: Vec::new(),
        })
    }

    fn detect_fingertips(&mut self, frame: &RawFrame) -> Vec<Fingertip> {
        if self.config.hand_speed.is_none() {
            return Vec::new();
        }
        fingertips_from_hands(
            &[self.landmarks()],
            frame.width as f32,
            frame.height as f32,
        )
    }

    fn poll_quit(&mut self) -> bool {
        self.config
            .max_frames
            .is_some_and(|max| self.frames_captured >= max)
    }

    fn frame_dt(&mut self) -> f32 {
        self.last_dt = match self.clock.as_mut() {
            Some(clock) => {
                std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
                clock.tick()
            }
            None => FRAME_DT,
        };
        self.last_dt
    }

    fn present(&mut self, frame: &RawFrame, snapshot: &RenderSnapshot, fingertips: &[Fingertip]) {
        self.last_geometry =
            renderer::build_frame(snapshot, fingertips, self.config.show_fingertips);
        log::trace!(
            "frame {}: {} | {} | {} targets, {} vertices",
            frame.index,
            snapshot.score_text,
            snapshot.missed_text,
            snapshot.targets.len(),
            self.last_geometry.vertices.len()
        );
        self.steer(snapshot);
        self.last_snapshot = Some(snapshot.clone());
    }
}
