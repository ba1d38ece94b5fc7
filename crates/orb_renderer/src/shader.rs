//! Local lighting for sphere hits.

use crate::Color;
use orb_math::Vec3;

/// Lambertian shading from a single directional light.
///
/// There is no ambient term and no specular term, so surfaces facing away
/// from the light are pure black and view direction never matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shader {
    /// Normalized direction the light travels in
    light_direction: Vec3,
}

impl Shader {
    /// Create a shader for a light travelling along `light_direction`.
    ///
    /// The direction is normalized here. A zero vector falls back to the
    /// default light.
    pub fn new(light_direction: Vec3) -> Self {
        Self {
            light_direction: light_direction
                .try_normalize()
                .unwrap_or_else(|| Self::default().light_direction),
        }
    }

    /// The normalized light direction.
    pub fn light_direction(&self) -> Vec3 {
        self.light_direction
    }

    /// Shade a hit. The result is not clamped; alpha is always 1.
    #[inline]
    pub fn shade(&self, _hit_point: Vec3, normal: Vec3, albedo: Vec3) -> Color {
        let d = normal.dot(-self.light_direction).max(0.0);
        (albedo * d).extend(1.0)
    }
}

impl Default for Shader {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(-1.0, -1.0, -1.0).normalize(),
        }
    }
}
