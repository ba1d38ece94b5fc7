// Re-export glam for convenience
pub use glam::*;

// Orb math types
mod camera;
mod ray;
pub use camera::Camera;
pub use ray::Ray;
