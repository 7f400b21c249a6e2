//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Two triangles covering an axis-aligned square (top-left origin)
pub fn square(top_left: Vec2, size: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (top_left.x, top_left.y);
    let (x1, y1) = (x0 + size, y0 + size);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Triangle fan for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let point = |i: u32| {
        let theta = (i as f32 / segments as f32) * TAU;
        center + Vec2::new(theta.cos(), theta.sin()) * radius
    };

    for i in 0..segments {
        let (a, b) = (point(i), point(i + 1));
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }

    vertices
}
