//! Fingertip touch detection
//!
//! A touch is a plain distance threshold against the target's center.

use glam::{IVec2, Vec2};

/// True iff the points are strictly closer than `threshold`
#[inline]
pub fn is_touching(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Index of the first fingertip (in input order) touching `center`
pub fn first_touching(fingertips: &[IVec2], center: Vec2, threshold: f32) -> Option<usize> {
    fingertips
        .iter()
        .position(|tip| is_touching(tip.as_vec2(), center, threshold))
}
