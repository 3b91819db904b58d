//! Shape generation for 2D primitives
//!
//! Turns [`DrawCommand`]s into plain triangle lists so any GPU backend can
//! upload them as-is.

use glam::Vec2;
use std::f32::consts::PI;

use super::commands::DrawCommand;
use super::vertex::{Vertex, with_alpha};

/// Segments used for a circle of radius 10; larger circles get more
const BASE_SEGMENTS: u32 = 16;
/// Halo opacity at the shape's edge
const GLOW_ALPHA: f32 = 0.35;

fn segments_for(radius: f32) -> u32 {
    ((radius / 10.0).sqrt() * BASE_SEGMENTS as f32).clamp(8.0, 64.0) as u32
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle), fading from `inner_color` to `outer_color`
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + inner_radius * Vec2::from_angle(theta1);
        let outer1 = center + outer_radius * Vec2::from_angle(theta1);
        let inner2 = center + inner_radius * Vec2::from_angle(theta2);
        let outer2 = center + outer_radius * Vec2::from_angle(theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Two triangles covering an axis-aligned quad given by its corners
fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    quad(min, Vec2::new(max.x, min.y), Vec2::new(min.x, max.y), max, color).to_vec()
}

/// Generate vertices for a thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    quad(from + perp, from - perp, to + perp, to - perp, color).to_vec()
}

/// Soft border around a rectangle (four quads fading outward)
fn rect_glow(min: Vec2, size: Vec2, color: [f32; 4], glow: f32) -> Vec<Vertex> {
    let max = min + size;
    let inner = with_alpha(color, GLOW_ALPHA);
    let outer = with_alpha(color, 0.0);
    let g = glow;
    let mut vertices = Vec::with_capacity(24);
    // top, bottom, left, right
    let bands = [
        (Vec2::new(min.x - g, min.y - g), Vec2::new(max.x + g, min.y - g), Vec2::new(min.x, min.y), Vec2::new(max.x, min.y)),
        (Vec2::new(min.x, max.y), Vec2::new(max.x, max.y), Vec2::new(min.x - g, max.y + g), Vec2::new(max.x + g, max.y + g)),
        (Vec2::new(min.x - g, min.y - g), Vec2::new(min.x, min.y), Vec2::new(min.x - g, max.y + g), Vec2::new(min.x, max.y)),
        (Vec2::new(max.x, min.y), Vec2::new(max.x + g, min.y - g), Vec2::new(max.x, max.y), Vec2::new(max.x + g, max.y + g)),
    ];
    for (i, (a, b, c, d)) in bands.into_iter().enumerate() {
        // Which corners sit on the shape's edge differs per band
        let (ca, cb, cc, cd) = match i {
            0 => (outer, outer, inner, inner),
            1 => (inner, inner, outer, outer),
            2 => (outer, inner, outer, inner),
            _ => (inner, outer, inner, outer),
        };
        vertices.extend_from_slice(&[
            Vertex::new(a.x, a.y, ca),
            Vertex::new(b.x, b.y, cb),
            Vertex::new(c.x, c.y, cc),
            Vertex::new(c.x, c.y, cc),
            Vertex::new(b.x, b.y, cb),
            Vertex::new(d.x, d.y, cd),
        ]);
    }
    vertices
}

/// Triangulate a whole frame. `Clear` produces no geometry.
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in commands {
        match *command {
            DrawCommand::Clear { .. } => {}
            DrawCommand::Circle {
                center,
                radius,
                color,
                glow,
            } => {
                let segments = segments_for(radius + glow);
                if glow > 0.0 {
                    vertices.extend(ring(
                        center,
                        radius,
                        radius + glow,
                        with_alpha(color, GLOW_ALPHA),
                        with_alpha(color, 0.0),
                        segments,
                    ));
                }
                vertices.extend(circle(center, radius, color, segments));
            }
            DrawCommand::Rect {
                min,
                size,
                color,
                glow,
            } => {
                if glow > 0.0 {
                    vertices.extend(rect_glow(min, size, color, glow));
                }
                vertices.extend(rect(min, size, color));
            }
            DrawCommand::Ring {
                center,
                radius,
                width,
                color,
            } => {
                let half = width * 0.5;
                vertices.extend(ring(
                    center,
                    (radius - half).max(0.0),
                    radius + half,
                    color,
                    color,
                    segments_for(radius),
                ));
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => vertices.extend(line(from, to, width, color)),
        }
    }
    vertices
}

/// Raw bytes ready for a vertex buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
