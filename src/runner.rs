//! Frame loop
//!
//! One iteration: quit check, capture, detect, update, present. The
//! platform only ever sees fully-updated snapshots.

use serde::{Deserialize, Serialize};

use crate::error::{SessionEnd, SessionError};
use crate::platform::Platform;
use crate::sim::GameSession;

/// Final (or last consistent) session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub missed: u32,
    /// Frames fully processed
    pub frames: u64,
    pub fall_speed: f32,
    pub spawn_interval: f32,
    /// `None` when the session was cut short by an error
    pub end: Option<SessionEnd>,
}

impl SessionSummary {
    pub fn of(session: &GameSession, frames: u64, end: Option<SessionEnd>) -> Self {
        Self {
            score: session.score(),
            missed: session.missed(),
            frames,
            fall_speed: session.fall_speed(),
            spawn_interval: session.spawn_interval(),
            end,
        }
    }
}

/// Play `session` to completion on `platform`
pub fn run<P: Platform + ?Sized>(
    platform: &mut P,
    session: &mut GameSession,
) -> Result<SessionSummary, SessionError> {
    log::info!(
        "Session start: {}x{}, miss limit {}",
        session.tuning().width,
        session.tuning().height,
        session.tuning().miss_limit
    );

    let mut frames = 0u64;
    let end = loop {
        if platform.poll_quit() {
            break SessionEnd::QuitRequested;
        }

        let frame = match platform.capture_frame() {
            Ok(frame) => frame,
            Err(source) => {
                log::error!("Input failure after {} frames: {}", frames, source);
                return Err(SessionError::InputAcquisition {
                    frame: frames,
                    source,
                    last: SessionSummary::of(session, frames, None),
                });
            }
        };

        let fingertips = platform.detect_fingertips(&frame);
        let dt = platform.frame_dt();
        session.update(dt, &fingertips);
        frames += 1;

        if session.is_terminal() {
            break SessionEnd::MissLimitReached;
        }

        platform.present(&frame, &session.snapshot(), &fingertips);
    };

    let summary = SessionSummary::of(session, frames, Some(end));
    log::info!(
        "Session over ({}): score {}, missed {}, {} frames",
        end,
        summary.score,
        summary.missed,
        summary.frames
    );
    Ok(summary)
}
