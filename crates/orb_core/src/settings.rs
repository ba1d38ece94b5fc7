//! Render and camera settings.
//!
//! Both are plain data with defaults matching the interactive viewer, and
//! both can be read from a scene file.

use orb_math::{Camera, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Per-frame shading and scheduling settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Color written when a ray hits nothing (RGBA)
    pub background: Vec4,
    /// Direction the single directional light travels in (normalized on use)
    pub light_direction: Vec3,
    /// Evaluate rows in parallel on the rayon pool
    pub multithreaded: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
            light_direction: Vec3::new(-1.0, -1.0, -1.0),
            multithreaded: true,
        }
    }
}

/// Camera placement and lens, as stored in a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub forward: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 6.0),
            forward: Vec3::NEG_Z,
            fov_y: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraSettings {
    /// Build a camera with no viewport yet.
    pub fn to_camera(&self) -> Camera {
        Camera::new(self.position, self.forward, self.fov_y, self.near, self.far)
    }
}
