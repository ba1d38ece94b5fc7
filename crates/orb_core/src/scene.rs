//! Scene types for Orb.
//!
//! A scene is a flat list of analytic spheres. The renderer borrows it for
//! the duration of a frame and never mutates it.

use orb_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// An analytic sphere with a diffuse albedo.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Centre in world space
    pub center: Vec3,

    /// Radius (>= 0)
    pub radius: f32,

    /// Diffuse reflectance (RGB, 0-1)
    pub albedo: Vec3,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, albedo: Vec3) -> Self {
        Self {
            center,
            radius,
            albedo,
        }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 0.5,
            albedo: Vec3::ONE,
        }
    }
}

/// A complete scene: an ordered collection of spheres.
///
/// Duplicate spheres are allowed. Order only matters for breaking ties
/// between hits at exactly the same distance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub spheres: Vec<Sphere>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from a list of spheres.
    pub fn from_spheres(spheres: Vec<Sphere>) -> Self {
        Self { spheres }
    }

    /// The starter scene: a magenta sphere resting on a large blue ground sphere.
    pub fn default_scene() -> Self {
        Self::from_spheres(vec![
            Sphere::new(Vec3::ZERO, 1.0, Vec3::new(1.0, 0.0, 1.0)),
            Sphere::new(Vec3::new(0.0, -101.0, 0.0), 100.0, Vec3::new(0.2, 0.3, 1.0)),
        ])
    }

    /// A seeded scatter of small spheres on a ground sphere.
    ///
    /// The same seed and count always produce the same scene.
    pub fn random(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scene = Self::new();

        // Ground
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, -1000.0, 0.0),
            1000.0,
            Vec3::new(0.5, 0.5, 0.5),
        ));

        // Spread the spheres over a square that grows with the count
        let extent = (count as f32).sqrt().max(1.0) * 1.5;
        for _ in 0..count {
            let radius = rng.gen_range(0.15..0.6);
            let center = Vec3::new(
                rng.gen_range(-extent..extent),
                radius,
                rng.gen_range(-extent..extent),
            );
            let albedo = Vec3::new(
                rng.gen::<f32>() * rng.gen::<f32>(),
                rng.gen::<f32>() * rng.gen::<f32>(),
                rng.gen::<f32>() * rng.gen::<f32>(),
            );
            scene.add_sphere(Sphere::new(center, radius, albedo));
        }

        scene
    }

    /// Add a sphere and return its index.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    /// Remove the sphere at `index`, if present.
    pub fn remove_sphere(&mut self, index: usize) -> Option<Sphere> {
        (index < self.spheres.len()).then(|| self.spheres.remove(index))
    }

    /// All spheres in iteration order.
    #[inline]
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Get sphere count.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene has no spheres.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}
