//! Closest-hit search over a scene.

use crate::sphere::intersect;
use crate::{Ray, Scene, Sphere};

/// Record of the closest ray-sphere intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// The sphere that was hit
    pub sphere: &'a Sphere,
    /// Index of the sphere in the scene
    pub index: usize,
    /// Parameter t where the intersection occurs
    pub t: f32,
}

/// Find the sphere with the smallest hit `t` along `ray`.
///
/// Every sphere is tested; there is no acceleration structure. Hits are not
/// bounded below, so a negative `t` behind the origin can win over a hit in
/// front. On exactly equal `t` the first sphere in scene order wins.
///
/// Candidates must be below `f32::MAX`, so NaN roots (from a zero or NaN
/// direction) and `+inf` roots never count as hits.
pub fn trace_closest<'a>(scene: &'a Scene, ray: &Ray) -> Option<HitRecord<'a>> {
    let mut closest: Option<HitRecord<'a>> = None;
    let mut closest_t = f32::MAX;

    for (index, sphere) in scene.spheres().iter().enumerate() {
        let Some(t) = intersect(ray, sphere) else {
            continue;
        };

        if t < closest_t {
            closest_t = t;
            closest = Some(HitRecord { sphere, index, t });
        }
    }

    closest
}
