//! Collision tests between the player's circle and the other entities
//!
//! Touching exactly at the boundary does not count as a hit.

use glam::Vec2;

/// Circle–circle overlap: distance between centers below the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Circle–rectangle overlap for an axis-aligned rect given by its top-left
/// corner and size.
///
/// Clamps the circle center onto the rectangle and compares the distance from
/// that closest point against the radius.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect_min: Vec2, rect_size: Vec2) -> bool {
    closest_point_on_rect(center, rect_min, rect_size).distance(center) < radius
}

/// Closest point on (or inside) a rectangle to `point`
#[inline]
pub fn closest_point_on_rect(point: Vec2, rect_min: Vec2, rect_size: Vec2) -> Vec2 {
    point.clamp(rect_min, rect_min + rect_size)
}

/// Keep a circle's center far enough from the edges that it stays on canvas
#[inline]
pub fn confine_circle(center: Vec2, radius: f32, canvas: Vec2) -> Vec2 {
    let min = Vec2::splat(radius);
    let max = (canvas - Vec2::splat(radius)).max(min);
    center.clamp(min, max)
}
