//! Angle geometry primitives.
//!
//! All angles are returned in degrees. The three-point form measures the
//! angle at vertex `b` between the vectors `b->a` and `b->c` and is always
//! in [0, 180]. Floating-point drift can push the cosine argument just
//! outside [-1, 1], so the clamp before `acos` is mandatory; without it
//! the result is NaN.

use crate::{Error, Result};
use nalgebra::{Vector2, Vector3};

/// A pose landmark position in normalized image space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Depth relative to the hip midpoint; smaller is closer to the camera
    pub z: f64,
    /// Model confidence that the landmark is visible in frame
    pub visibility: f32,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    fn to_vec3(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Projection onto the frontal (x-y) plane, depth dropped
    fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

fn angle_from_cosine(dot: f64, norm_product: f64, context: &str) -> Result<f64> {
    if norm_product < crate::constants::EPSILON {
        return Err(Error::DegenerateGeometry(format!(
            "zero-length limb vector in {context}"
        )));
    }
    let cosine = (dot / norm_product).clamp(-1.0, 1.0);
    Ok(cosine.acos().to_degrees())
}

/// Angle at vertex `b` between `b->a` and `b->c` in 3D space
///
/// # Errors
///
/// Returns [`Error::DegenerateGeometry`] if either limb vector has zero
/// length (coincident landmarks).
pub fn angle_between(a: Landmark, b: Landmark, c: Landmark) -> Result<f64> {
    let ba = a.to_vec3() - b.to_vec3();
    let bc = c.to_vec3() - b.to_vec3();
    angle_from_cosine(ba.dot(&bc), ba.norm() * bc.norm(), "angle_between")
}

/// Angle at vertex `b` with the landmarks projected onto the frontal plane
///
/// # Errors
///
/// Returns [`Error::DegenerateGeometry`] if either projected limb vector
/// has zero length.
pub fn angle_between_frontal(a: Landmark, b: Landmark, c: Landmark) -> Result<f64> {
    let ba = a.to_vec2() - b.to_vec2();
    let bc = c.to_vec2() - b.to_vec2();
    angle_from_cosine(ba.dot(&bc), ba.norm() * bc.norm(), "angle_between_frontal")
}

/// Angle between the frontal-plane vector `a->b` and the vertical axis
///
/// # Errors
///
/// Returns [`Error::DegenerateGeometry`] if the projected vector has zero
/// length.
pub fn angle_with_vertical(a: Landmark, b: Landmark) -> Result<f64> {
    let ab = b.to_vec2() - a.to_vec2();
    let vertical = Vector2::new(0.0, 1.0);
    angle_from_cosine(ab.dot(&vertical), ab.norm(), "angle_with_vertical")
}
