//! Hand-landmark to fingertip conversion
//!
//! Hand trackers report 21 normalized landmarks per hand. Only the five
//! fingertips matter for touching targets.

use glam::{IVec2, Vec2};

/// Landmarks per tracked hand
pub const LANDMARK_COUNT: usize = 21;

pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_TIP: usize = 8;
pub const MIDDLE_FINGER_TIP: usize = 12;
pub const RING_FINGER_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// Fingertip scan order within one hand
pub const FINGERTIP_ORDER: [usize; 5] = [
    INDEX_FINGER_TIP,
    MIDDLE_FINGER_TIP,
    RING_FINGER_TIP,
    PINKY_TIP,
    THUMB_TIP,
];

/// One detected hand, coordinates normalized to 0..1 of the frame
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    pub points: [Vec2; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Vec2; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// A hand with every landmark at `palm` and the fingertips overridden
    pub fn from_tips(palm: Vec2, tips: [Vec2; 5]) -> Self {
        let mut points = [palm; LANDMARK_COUNT];
        for (slot, tip) in FINGERTIP_ORDER.iter().zip(tips) {
            points[*slot] = tip;
        }
        Self { points }
    }
}

/// Pixel fingertips for all hands, hand by hand in `FINGERTIP_ORDER`
///
/// Coordinates are scaled by the screen size and truncated toward zero.
pub fn fingertips_from_hands(hands: &[HandLandmarks], width: f32, height: f32) -> Vec<IVec2> {
    let scale = Vec2::new(width, height);
    hands
        .iter()
        .flat_map(|hand| {
            FINGERTIP_ORDER
                .iter()
                .map(move |&i| (hand.points[i] * scale).as_ivec2())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_and_order() {
        let tips = [
            Vec2::new(0.5, 0.5),
            Vec2::new(0.25, 0.125),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.125, 0.875),
        ];
        let hand = HandLandmarks::from_tips(Vec2::splat(0.4), tips);
        let out = fingertips_from_hands(&[hand], 1280.0, 720.0);
        assert_eq!(
            out,
            vec![
                IVec2::new(640, 360),
                IVec2::new(320, 90),
                IVec2::new(0, 0),
                IVec2::new(1280, 720),
                IVec2::new(160, 630),
            ]
        );
    }

    #[test]
    fn test_truncates_toward_zero() {
        let hand = HandLandmarks::from_tips(Vec2::ZERO, [Vec2::new(0.0009, 0.0019); 5]);
        let out = fingertips_from_hands(&[hand], 1000.0, 1000.0);
        assert!(out.iter().all(|p| *p == IVec2::new(0, 1)));
    }

    #[test]
    fn test_multiple_hands_and_none() {
        let a = HandLandmarks::from_tips(Vec2::ZERO, [Vec2::new(0.25, 0.25); 5]);
        let b = HandLandmarks::from_tips(Vec2::ZERO, [Vec2::new(0.75, 0.75); 5]);
        let out = fingertips_from_hands(&[a, b], 100.0, 100.0);
        assert_eq!(out.len(), 10);
        assert_eq!(out[0], IVec2::new(25, 25));
        assert_eq!(out[9], IVec2::new(75, 75));
        assert!(fingertips_from_hands(&[], 100.0, 100.0).is_empty());
    }
}
