//! Scene file loading and saving.
//!
//! Scene files are JSON documents holding the spheres plus optional camera
//! and render settings:
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0, 6], "fov_y": 45 },
//!   "settings": { "multithreaded": true },
//!   "spheres": [
//!     { "center": [0, 0, 0], "radius": 1, "albedo": [1, 0, 1] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::Scene;
use crate::settings::{CameraSettings, RenderSettings};

/// Errors that can occur while reading or writing scene files.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sphere {index}: {reason}")]
    InvalidSphere { index: usize, reason: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for scene file operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Everything a scene file describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraSettings,

    #[serde(default)]
    pub settings: RenderSettings,

    #[serde(flatten)]
    pub scene: Scene,
}

/// Load and validate a scene file.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneFile> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let file = load_scene_from_str(&source)?;

    log::info!(
        "Loaded {} spheres from {}",
        file.scene.sphere_count(),
        path.display()
    );
    Ok(file)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(source: &str) -> SceneResult<SceneFile> {
    let file: SceneFile = serde_json::from_str(source)?;
    validate_camera(&file.camera)?;
    validate(&file.scene)?;
    Ok(file)
}

/// Write a scene file as pretty-printed JSON.
pub fn save_scene(path: impl AsRef<Path>, file: &SceneFile) -> SceneResult<()> {
    let json = serde_json::to_string_pretty(file)?;
    fs::write(path, json)?;
    Ok(())
}

fn validate_camera(camera: &CameraSettings) -> SceneResult<()> {
    if !camera.position.is_finite() {
        return Err(SceneError::InvalidCamera(format!(
            "position {} is not finite",
            camera.position
        )));
    }
    if camera.forward.try_normalize().is_none() {
        return Err(SceneError::InvalidCamera(format!(
            "forward {} has no direction",
            camera.forward
        )));
    }
    if !camera.fov_y.is_finite() || camera.fov_y <= 0.0 || camera.fov_y >= 180.0 {
        return Err(SceneError::InvalidCamera(format!(
            "fov_y {} must be in (0, 180) degrees",
            camera.fov_y
        )));
    }
    if !camera.near.is_finite() || camera.near <= 0.0 {
        return Err(SceneError::InvalidCamera(format!(
            "near {} must be finite and > 0",
            camera.near
        )));
    }
    if !camera.far.is_finite() || camera.far <= camera.near {
        return Err(SceneError::InvalidCamera(format!(
            "far {} must be finite and > near {}",
            camera.far, camera.near
        )));
    }
    Ok(())
}

fn validate(scene: &Scene) -> SceneResult<()> {
    for (index, sphere) in scene.spheres().iter().enumerate() {
        if !sphere.center.is_finite() {
            return Err(SceneError::InvalidSphere {
                index,
                reason: format!("center {} is not finite", sphere.center),
            });
        }
        if !sphere.radius.is_finite() || sphere.radius < 0.0 {
            return Err(SceneError::InvalidSphere {
                index,
                reason: format!("radius {} must be finite and >= 0", sphere.radius),
            });
        }
        if !sphere.albedo.is_finite() {
            return Err(SceneError::InvalidSphere {
                index,
                reason: format!("albedo {} is not finite", sphere.albedo),
            });
        }

        // Shaded output is clamped, so bright albedo only saturates
        if sphere.albedo.min_element() < 0.0 || sphere.albedo.max_element() > 1.0 {
            log::warn!(
                "Sphere {} albedo {} is outside [0, 1]",
                index,
                sphere.albedo
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_math::Vec3;

    #[test]
    fn test_load_minimal() {
        let file = load_scene_from_str(
            r#"{ "spheres": [ { "center": [0, 0, -1], "radius": 0.5, "albedo": [1, 0, 0] } ] }"#,
        )
        .unwrap();

        assert_eq!(file.scene.sphere_count(), 1);
        assert_eq!(file.scene.spheres()[0].center, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(file.camera, CameraSettings::default());
        assert_eq!(file.settings, RenderSettings::default());
    }

    #[test]
    fn test_load_empty_document() {
        let file = load_scene_from_str("{}").unwrap();
        assert!(file.scene.is_empty());
    }

    #[test]
    fn test_load_camera_override() {
        let file = load_scene_from_str(
            r#"{ "camera": { "position": [1, 2, 3], "fov_y": 60 }, "spheres": [] }"#,
        )
        .unwrap();

        assert_eq!(file.camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(file.camera.fov_y, 60.0);
        assert_eq!(file.camera.forward, Vec3::NEG_Z);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let result = load_scene_from_str(
            r#"{ "spheres": [
                { "center": [0, 0, 0], "radius": 1, "albedo": [1, 1, 1] },
                { "center": [0, 0, 0], "radius": -1, "albedo": [1, 1, 1] }
            ] }"#,
        );

        match result {
            Err(SceneError::InvalidSphere { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidSphere, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_radius_allowed() {
        let file = load_scene_from_str(
            r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 0, "albedo": [1, 1, 1] } ] }"#,
        )
        .unwrap();
        assert_eq!(file.scene.spheres()[0].radius, 0.0);
    }

    #[test]
    fn test_bright_albedo_allowed() {
        let file = load_scene_from_str(
            r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 1, "albedo": [2, 0, 0] } ] }"#,
        )
        .unwrap();
        assert_eq!(file.scene.spheres()[0].albedo.x, 2.0);
    }

    #[test]
    fn test_zero_fov_rejected() {
        let result = load_scene_from_str(r#"{ "camera": { "fov_y": 0 } }"#);
        assert!(matches!(result, Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_zero_near_rejected() {
        let result = load_scene_from_str(r#"{ "camera": { "near": 0 } }"#);
        assert!(matches!(result, Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_far_not_beyond_near_rejected() {
        let result = load_scene_from_str(r#"{ "camera": { "near": 5, "far": 5 } }"#);
        assert!(matches!(result, Err(SceneError::InvalidCamera(_))));

        let result = load_scene_from_str(r#"{ "camera": { "near": 5, "far": 1 } }"#);
        assert!(matches!(result, Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_zero_forward_rejected() {
        let result = load_scene_from_str(r#"{ "camera": { "forward": [0, 0, 0] } }"#);
        assert!(matches!(result, Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = load_scene_from_str(r#"{ "spheres": [ { "center": [0, 0] } ] }"#);
        assert!(matches!(result, Err(SceneError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_scene("/nonexistent/orb/scene.json");
        assert!(matches!(result, Err(SceneError::Io(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("orb_scene_{}.json", std::process::id()));
        let file = SceneFile {
            scene: Scene::default_scene(),
            ..Default::default()
        };

        save_scene(&path, &file).unwrap();
        let loaded = load_scene(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, file);
    }
}
