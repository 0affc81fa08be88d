//! Distance and sampling primitives.
//!
//! Positions are `[x, y, z]` in meters with Y up. Ring sampling stays on the
//! orbital plane (`y == 0`); sphere-shell sampling covers every elevation.
//! Outposts, asteroid fields and hazards use rings, while NPC groups and
//! background dressing use shells.

use std::f64::consts::TAU;

use crate::rng::SectorRng;

/// A 3-component world vector (meters, or Euler degrees for rotations).
pub type Vec3 = [f64; 3];

/// The world origin.
pub const ORIGIN: Vec3 = [0.0, 0.0, 0.0];

/// Component-wise sum.
#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    let d = sub(a, b);
    dot(d, d).sqrt()
}

/// Distance from `point` to the closest point of the segment `start..end`.
///
/// The projection parameter is clamped to `[0, 1]`. A degenerate segment
/// (length below 1e-9 squared) degrades to the distance from `start`.
pub fn segment_distance(point: Vec3, start: Vec3, end: Vec3) -> f64 {
    let segment = sub(end, start);
    let length_sq = dot(segment, segment);
    if length_sq <= 1e-9 {
        return distance(point, start);
    }
    let t = (dot(sub(point, start), segment) / length_sq).clamp(0.0, 1.0);
    let closest = [
        start[0] + segment[0] * t,
        start[1] + segment[1] * t,
        start[2] + segment[2] * t,
    ];
    distance(point, closest)
}

/// A point on the `y == 0` plane at a uniform radius in
/// `[min_radius, max_radius)` and a uniform angle in `[0, 2π)`.
///
/// Draw order: radius, then angle.
pub fn sample_ring(rng: &mut SectorRng, min_radius: f64, max_radius: f64) -> Vec3 {
    let radius = rng.uniform(min_radius, max_radius);
    let angle = rng.uniform(0.0, TAU);
    [radius * angle.cos(), 0.0, radius * angle.sin()]
}

/// A point at a uniform radius in `[min_radius, max_radius)` in a uniformly
/// distributed 3D direction.
///
/// Draw order: radius, `u ∈ [-1, 1)` (the Y component of the direction),
/// then the azimuth `θ ∈ [0, 2π)`.
pub fn sample_sphere_shell(rng: &mut SectorRng, min_radius: f64, max_radius: f64) -> Vec3 {
    let radius = rng.uniform(min_radius, max_radius);
    let u = rng.uniform(-1.0, 1.0);
    let theta = rng.uniform(0.0, TAU);
    let planar = (1.0 - u * u).max(0.0).sqrt();
    [
        radius * planar * theta.cos(),
        radius * u,
        radius * planar * theta.sin(),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
