//! Ray-sphere intersection.

use crate::{Ray, Sphere};
use orb_math::Vec3;

/// Intersect a ray with a sphere.
///
/// Solves `|origin + t * direction - center|² = radius²` for `t` and returns
/// the near root, or `None` when the discriminant is negative.
///
/// Only the near root is ever reported and it is not bounded below, so a ray
/// starting inside the sphere gets a negative `t`. A zero direction makes
/// `a == 0` and yields a non-finite `t`; callers are expected to pass
/// non-zero directions.
#[inline]
pub fn intersect(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    // x = ax + bx * t
    // y = ay + by * t
    // (x - cx)^2 + (y - cy)^2 + (z - cz)^2 = r^2
    let oc = ray.origin - sphere.center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()) / (2.0 * a))
}

/// Unit normal pointing from the sphere's centre through `point`.
#[inline]
pub fn outward_normal(sphere: &Sphere, point: Vec3) -> Vec3 {
    (point - sphere.center).normalize()
}
