//! Render-facing geometry
//!
//! Turns a session snapshot into colored triangles. Drawing them (over the
//! camera backdrop, together with the HUD text) is up to the platform.

pub mod shapes;
pub mod vertex;

use glam::IVec2;

use crate::sim::RenderSnapshot;
pub use vertex::{Vertex, colors};

/// Radius of fingertip markers (pixels)
pub const FINGERTIP_MARKER_RADIUS: f32 = 6.0;
const FINGERTIP_MARKER_SEGMENTS: u32 = 10;

/// Triangle list plus HUD lines for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameGeometry {
    pub vertices: Vec<Vertex>,
    /// (text, top-left position, color), top to bottom
    pub hud: Vec<(String, [f32; 2], [f32; 4])>,
}

impl FrameGeometry {
    /// Raw vertex bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Build the overlay for a snapshot, targets in spawn order
pub fn build_frame(
    snapshot: &RenderSnapshot,
    fingertips: &[IVec2],
    show_fingertips: bool,
) -> FrameGeometry {
    let marker_count = if show_fingertips { fingertips.len() } else { 0 };
    let mut vertices = Vec::with_capacity(
        snapshot.targets.len() * 6 + marker_count * FINGERTIP_MARKER_SEGMENTS as usize * 3,
    );

    for target in &snapshot.targets {
        vertices.extend(shapes::square(
            target.position,
            target.size,
            colors::target(target.color),
        ));
    }

    if show_fingertips {
        for tip in fingertips {
            vertices.extend(shapes::circle(
                tip.as_vec2(),
                FINGERTIP_MARKER_RADIUS,
                colors::FINGERTIP,
                FINGERTIP_MARKER_SEGMENTS,
            ));
        }
    }

    FrameGeometry {
        vertices,
        hud: vec![
            (snapshot.score_text.clone(), [10.0, 10.0], colors::HUD_TEXT),
            (snapshot.missed_text.clone(), [10.0, 50.0], colors::HUD_TEXT),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::{GameSession, TargetColor};
    use glam::Vec2;

    #[test]
    fn test_build_frame_targets_and_hud() {
        let mut session = GameSession::new(Tuning::default(), Some(1));
        session.place_target(TargetColor::Red, Vec2::new(0.0, 0.0));
        session.place_target(TargetColor::Blue, Vec2::new(100.0, 0.0));

        let geometry = build_frame(&session.snapshot(), &[IVec2::new(5, 5)], false);

        assert_eq!(geometry.vertices.len(), 12);
        assert_eq!(geometry.vertices[0].color, colors::RED);
        assert_eq!(geometry.vertices[6].color, colors::BLUE);
        assert_eq!(geometry.hud[0].0, "Score: 0");
        assert_eq!(geometry.hud[1].0, "Missed: 0/5");
        assert_eq!(
            geometry.as_bytes().len(),
            12 * std::mem::size_of::<Vertex>()
        );
    }

    #[test]
    fn test_fingertip_markers() {
        let session = GameSession::new(Tuning::default(), Some(1));
        let tips = [IVec2::new(5, 5), IVec2::new(50, 50)];
        let geometry = build_frame(&session.snapshot(), &tips, true);
        assert_eq!(
            geometry.vertices.len(),
            2 * FINGERTIP_MARKER_SEGMENTS as usize * 3
        );
    }

    #[test]
    fn test_colors_match_target_rgb() {
        for color in [TargetColor::Green, TargetColor::Red, TargetColor::Blue] {
            let rgb = color.rgb();
            let rgba = colors::target(color);
            for i in 0..3 {
                assert_eq!(rgba[i], rgb[i] as f32 / 255.0);
            }
        }
    }
}
