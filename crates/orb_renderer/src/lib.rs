//! Orb Renderer - CPU sphere ray tracing
//!
//! A single-bounce, local-lighting ray tracer for scenes of analytic spheres.
//! Every pixel is evaluated independently: one primary ray, closest hit,
//! Lambertian shading from one directional light, then packed to RGBA8.

mod color;
mod output;
mod renderer;
mod shader;
mod sphere;
mod tracer;

pub use color::{pack, unpack, Color};
pub use output::{ExportError, ExportResult, Image, OutputImage};
pub use renderer::{trace_ray, Renderer};
pub use shader::Shader;
pub use sphere::{intersect, outward_normal};
pub use tracer::{trace_closest, HitRecord};

/// Re-export scene types from orb_core
pub use orb_core::{RenderSettings, Scene, Sphere};

/// Re-export math types from orb_math
pub use orb_math::{Camera, Ray, Vec3, Vec4};
