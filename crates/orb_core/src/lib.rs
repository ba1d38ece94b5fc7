//! Orb Core - Scene description for the sphere ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`
//! - **Render settings**: `RenderSettings`, `CameraSettings`
//! - **Scene files**: JSON loading and saving
//!
//! # Example
//!
//! ```ignore
//! use orb_core::load_scene;
//!
//! let file = load_scene("spheres.json")?;
//! println!("Loaded {} spheres", file.scene.sphere_count());
//! ```

pub mod loader;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, save_scene, SceneError, SceneFile, SceneResult};
pub use scene::{Scene, Sphere};
pub use settings::{CameraSettings, RenderSettings};
