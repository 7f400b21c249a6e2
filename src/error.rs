//! Session errors and completion reasons

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::runner::SessionSummary;

/// Failure of the camera / hand-tracking collaborator
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The camera returned no frame
    CaptureFailed { frame: u64 },
    /// Capture or detection backend is not available at all
    BackendUnavailable { reason: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaptureFailed { frame } => write!(f, "camera read failed at frame {frame}"),
            Self::BackendUnavailable { reason } => {
                write!(f, "input backend unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// How a session finished normally
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEnd {
    MissLimitReached,
    QuitRequested,
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissLimitReached => write!(f, "miss limit reached"),
            Self::QuitRequested => write!(f, "quit requested"),
        }
    }
}

/// Fatal session failure
#[derive(Clone, Debug)]
pub enum SessionError {
    /// Input acquisition failed; `last` holds the final consistent state
    InputAcquisition {
        frame: u64,
        source: InputError,
        last: SessionSummary,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputAcquisition {
                frame,
                source,
                last,
            } => write!(
                f,
                "input acquisition failed at frame {frame}: {source} (score {}, missed {})",
                last.score, last.missed
            ),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InputAcquisition { source, .. } => Some(source),
        }
    }
}

impl SessionError {
    /// Last consistent session state before the failure
    pub fn last_summary(&self) -> &SessionSummary {
        match self {
            Self::InputAcquisition { last, .. } => last,
        }
    }
}
