//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (screen pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::sim::TargetColor;

    pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const HUD_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FINGERTIP: [f32; 4] = [1.0, 1.0, 1.0, 0.6];

    pub fn target(color: TargetColor) -> [f32; 4] {
        match color {
            TargetColor::Green => GREEN,
            TargetColor::Red => RED,
            TargetColor::Blue => BLUE,
        }
    }
}
