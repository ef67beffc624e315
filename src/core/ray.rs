//! Rays and ray hits shared by every ray-casting variant.
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Stands in for a zero tangent on axis-parallel rays.
const TANGENT_EPSILON: f32 = 1e-6;

/// Wraps any angle into `[0, 2π)`.
#[inline]
pub fn normalize_0_2pi(radians: f32) -> f32 {
    let a = radians.rem_euclid(TAU);
    // rem_euclid may round up to TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// A ray on the floor plane.
///
/// ```text
///   Z
///   ^      _
///   |      /|
///   |     /
///   |    / alpha
///   |   *----
///   |  (x,z)
///   +-------------> X
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub x: f32,
    pub z: f32,
    /// Always in `[0, 2π)`.
    pub alpha_rad: f32,
}

impl Ray {
    pub fn new(x: f32, z: f32, alpha_rad: f32) -> Self {
        Self { x, z, alpha_rad: normalize_0_2pi(alpha_rad) }
    }

    /// Same angle, different origin.
    #[inline]
    pub fn moved_to(&self, x: f32, z: f32) -> Self {
        Self { x, z, alpha_rad: self.alpha_rad }
    }

    #[inline]
    pub fn facing_up(&self) -> bool {
        (0.0..PI).contains(&self.alpha_rad)
    }

    #[inline]
    pub fn facing_right(&self) -> bool {
        (0.0..FRAC_PI_2).contains(&self.alpha_rad) || (3.0 * FRAC_PI_2..TAU).contains(&self.alpha_rad)
    }

    /// `|tan(alpha)|`, never exactly zero.
    #[inline]
    pub fn abs_tangent(&self) -> f32 {
        self.alpha_rad.tan().abs().max(TANGENT_EPSILON)
    }
}

/// Result of a ray meeting a wall or a sprite.
///
/// A negative distance means nothing was hit; the other fields are then
/// meaningless, so check [`RayHit::is_hit`] first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub x: f32,
    pub z: f32,
    pub distance: f32,
    /// Offset along the hit face, for texture sampling.
    pub offset: f32,
    pub hit_object_id: Option<u8>,
}

impl RayHit {
    const NO_HIT: f32 = -1.0;

    pub fn none() -> Self {
        Self { x: 0.0, z: 0.0, distance: Self::NO_HIT, offset: 0.0, hit_object_id: None }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance != Self::NO_HIT
    }

    #[inline]
    pub fn is_miss(&self) -> bool {
        !self.is_hit()
    }
}

impl Default for RayHit {
    fn default() -> Self {
        Self::none()
    }
}

/// Pythagoras on the floor plane.
#[inline]
pub fn distance(x1: f32, z1: f32, x2: f32, z2: f32) -> f32 {
    (x1 - x2).hypot(z1 - z2)
}
