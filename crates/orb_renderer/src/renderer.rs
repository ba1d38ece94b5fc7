//! Frame renderer.
//!
//! Owns the packed pixel buffer and the output image, and evaluates one
//! primary ray per pixel every frame:
//! - Closest-hit search over all spheres
//! - Lambertian shading from one directional light
//! - Clamp to [0, 1] and pack to RGBA8

use std::time::Instant;

use rayon::prelude::*;

use crate::color::{pack, Color};
use crate::output::{Image, OutputImage};
use crate::sphere::outward_normal;
use crate::tracer::trace_closest;
use crate::{Camera, Ray, RenderSettings, Scene, Shader};

/// Compute the unclamped color seen by a ray.
///
/// Misses return `background`. Hits are shaded with the sphere's albedo and
/// the outward normal at the hit point.
pub fn trace_ray(scene: &Scene, ray: &Ray, shader: &Shader, background: Color) -> Color {
    let Some(hit) = trace_closest(scene, ray) else {
        return background;
    };

    let hit_point = ray.at(hit.t);
    let normal = outward_normal(hit.sphere, hit_point);
    shader.shade(hit_point, normal, hit.sphere.albedo)
}

/// Renders scenes into a packed pixel buffer and presents it to an image.
///
/// The buffer and image are created by the first [`Renderer::on_resize`];
/// until then [`Renderer::render`] does nothing.
pub struct Renderer<I: OutputImage = Image> {
    final_image: Option<I>,
    image_data: Vec<u32>,
    settings: RenderSettings,
    frame_index: u64,
    /// Set once a camera with the wrong number of directions has been reported
    mismatch_reported: bool,
}

impl<I: OutputImage> Renderer<I> {
    /// Create a renderer with no image yet.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            final_image: None,
            image_data: Vec::new(),
            settings,
            frame_index: 0,
            mismatch_reported: false,
        }
    }

    /// Resize the output. Does nothing when the size is unchanged.
    ///
    /// Otherwise the image is resized (or created) and the pixel buffer is
    /// reallocated to `width * height` entries; old pixels are discarded.
    /// A zero width or height is accepted and produces an empty frame.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        match &mut self.final_image {
            Some(image) => {
                if image.width() == width && image.height() == height {
                    return;
                }
                image.resize(width, height);
            }
            None => self.final_image = Some(I::new(width, height)),
        }

        if width == 0 || height == 0 {
            log::warn!("Resized to empty image {}x{}", width, height);
        } else {
            log::info!("Resized to {}x{}", width, height);
        }

        // Release the old buffer before allocating the new one
        self.image_data = Vec::new();
        self.image_data = vec![0; (width as usize) * (height as usize)];
    }

    /// Render one frame and submit it to the output image.
    ///
    /// `camera` should provide one ray direction per pixel of the current
    /// image size. Pixels without a direction are written as background and
    /// the mismatch is logged once.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) {
        let Some(image) = self.final_image.as_mut() else {
            log::debug!("render called before on_resize; skipping frame");
            return;
        };

        let start = Instant::now();
        let width = image.width() as usize;
        let height = image.height() as usize;

        let origin = camera.position();
        let directions = camera.ray_directions();
        if directions.len() != width * height {
            if !self.mismatch_reported {
                log::warn!(
                    "Camera has {} ray directions for a {}x{} image; missing pixels use the background",
                    directions.len(),
                    width,
                    height
                );
                self.mismatch_reported = true;
            }
        } else {
            self.mismatch_reported = false;
        }

        let shader = Shader::new(self.settings.light_direction);
        let background = self.settings.background;

        let pixel = |index: usize| -> u32 {
            let color = match directions.get(index) {
                Some(&direction) => {
                    trace_ray(scene, &Ray::new(origin, direction), &shader, background)
                }
                None => background,
            };
            pack(color.clamp(Color::ZERO, Color::ONE))
        };

        if width > 0 {
            if self.settings.multithreaded {
                self.image_data
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| {
                        for (x, out) in row.iter_mut().enumerate() {
                            *out = pixel(x + y * width);
                        }
                    });
            } else {
                for y in 0..height {
                    for x in 0..width {
                        self.image_data[x + y * width] = pixel(x + y * width);
                    }
                }
            }
        }

        image.set_data(&self.image_data);
        self.frame_index += 1;

        log::debug!(
            "Frame {} ({}x{}, {} spheres) in {:?}",
            self.frame_index,
            width,
            height,
            scene.sphere_count(),
            start.elapsed()
        );
    }

    /// The output image, once created by [`Renderer::on_resize`].
    pub fn final_image(&self) -> Option<&I> {
        self.final_image.as_ref()
    }

    /// The packed pixel buffer of the last frame.
    pub fn image_data(&self) -> &[u32] {
        &self.image_data
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    /// Number of frames rendered so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl<I: OutputImage> Default for Renderer<I> {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{unpack, Sphere, Vec3};

    const BLACK: u32 = 0xFF00_0000;

    fn renderer(width: u32, height: u32) -> Renderer {
        let mut renderer = Renderer::default();
        renderer.on_resize(width, height);
        renderer
    }

    fn camera(width: u32, height: u32) -> Camera {
        let mut camera = Camera::default();
        camera.on_resize(width, height);
        camera
    }

    #[test]
    fn test_render_before_resize_is_noop() {
        let mut renderer: Renderer = Renderer::default();
        renderer.render(&Scene::default_scene(), &Camera::default());

        assert!(renderer.final_image().is_none());
        assert_eq!(renderer.frame_index(), 0);
    }

    #[test]
    fn test_empty_scene_is_background() {
        let mut renderer = renderer(8, 6);
        renderer.render(&Scene::new(), &camera(8, 6));

        assert!(renderer.image_data().iter().all(|&p| p == BLACK));
        assert!(renderer
            .final_image()
            .unwrap()
            .pixels()
            .iter()
            .all(|&p| p == BLACK));
    }

    #[test]
    fn test_custom_background() {
        let mut renderer = renderer(4, 4);
        renderer.set_settings(RenderSettings {
            background: Color::new(0.0, 0.0, 1.0, 1.0),
            ..Default::default()
        });
        renderer.render(&Scene::new(), &camera(4, 4));

        assert!(renderer.image_data().iter().all(|&p| unpack(p) == [0, 0, 255, 255]));
    }

    #[test]
    fn test_centered_sphere_hits_center_misses_edges() {
        // Unit sphere at the origin seen from z=6 with a 45 degree FOV covers
        // roughly the middle quarter of the image
        let scene = Scene::from_spheres(vec![Sphere::new(Vec3::ZERO, 1.0, Vec3::ONE)]);
        let (w, h) = (21, 21);
        let camera = camera(w, h);

        let center = Ray::new(camera.position(), camera.ray_directions()[10 + 10 * 21]);
        assert!(trace_closest(&scene, &center).is_some());

        for index in [0, 20, 20 * 21, 20 + 20 * 21, 10, 10 * 21] {
            let ray = Ray::new(camera.position(), camera.ray_directions()[index]);
            assert!(trace_closest(&scene, &ray).is_none(), "pixel {index} should miss");
        }

        let mut renderer = renderer(w, h);
        renderer.render(&scene, &camera);
        let image = renderer.final_image().unwrap();
        assert_eq!(image.get(0, 0), BLACK);
        assert_eq!(image.get(20, 20), BLACK);
    }

    #[test]
    fn test_red_sphere_example() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Vec3::new(1.0, 0.0, 0.0));
        let scene = Scene::from_spheres(vec![sphere]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = trace_closest(&scene, &ray).unwrap();
        assert!((hit.t - 0.5).abs() < 0.001);

        let normal = outward_normal(hit.sphere, ray.at(hit.t));
        assert!(normal.abs_diff_eq(Vec3::Z, 1e-5));

        let color = trace_ray(&scene, &ray, &Shader::default(), Color::W);
        let [r, g, b, a] = unpack(pack(color.clamp(Color::ZERO, Color::ONE)));
        assert!(r > 0);
        assert!(r > g && r > b);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_zero_direction_pixel_is_background() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Vec3::new(1.0, 0.0, 0.0));
        let scene = Scene::from_spheres(vec![sphere]);
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        let blue = Color::new(0.0, 0.0, 1.0, 1.0);

        let color = trace_ray(&scene, &ray, &Shader::default(), blue);
        assert_eq!(color, blue);
        assert_eq!(unpack(pack(color)), [0, 0, 255, 255]);
    }

    #[test]
    fn test_camera_size_mismatch_falls_back_to_background() {
        let scene = Scene::default_scene();
        let mut renderer = renderer(4, 4);
        renderer.set_settings(RenderSettings {
            background: Color::new(0.0, 1.0, 0.0, 1.0),
            ..Default::default()
        });

        // Camera covers only the first two rows
        renderer.render(&scene, &camera(4, 2));
        assert_eq!(renderer.frame_index(), 1);
        assert!(renderer.mismatch_reported);
        for &pixel in &renderer.image_data()[8..] {
            assert_eq!(unpack(pixel), [0, 255, 0, 255]);
        }

        // Matching camera clears the report
        renderer.render(&scene, &camera(4, 4));
        assert!(!renderer.mismatch_reported);
    }

    #[test]
    fn test_bright_albedo_is_clamped() {
        // Facing the light head on, albedo 4 would shade to 4.0
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Vec3::new(4.0, 0.0, 0.0));
        let scene = Scene::from_spheres(vec![sphere]);

        let mut renderer = renderer(1, 1);
        renderer.set_settings(RenderSettings {
            light_direction: Vec3::NEG_Z,
            ..Default::default()
        });
        let mut camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, 45.0, 0.1, 100.0);
        camera.on_resize(1, 1);
        renderer.render(&scene, &camera);

        assert_eq!(unpack(renderer.image_data()[0]), [255, 0, 0, 255]);
    }

    #[test]
    fn test_multithreaded_matches_sequential() {
        let scene = Scene::random(3, 25);
        let camera = camera(32, 24);

        let mut parallel = renderer(32, 24);
        parallel.render(&scene, &camera);

        let mut sequential = renderer(32, 24);
        sequential.set_settings(RenderSettings {
            multithreaded: false,
            ..Default::default()
        });
        sequential.render(&scene, &camera);

        assert_eq!(parallel.image_data(), sequential.image_data());
        assert!(parallel.image_data().iter().any(|&p| p != BLACK));
    }

    #[test]
    fn test_resize_same_size_is_noop() {
        let mut renderer = renderer(8, 8);
        renderer.render(&Scene::default_scene(), &camera(8, 8));
        let ptr = renderer.image_data().as_ptr();
        let before = renderer.image_data().to_vec();

        renderer.on_resize(8, 8);
        assert_eq!(renderer.image_data().as_ptr(), ptr);
        assert_eq!(renderer.image_data(), &before[..]);
    }

    #[test]
    fn test_resize_new_size_reallocates() {
        let mut renderer = renderer(8, 8);
        renderer.render(&Scene::new(), &camera(8, 8));
        assert!(renderer.image_data().iter().all(|&p| p == BLACK));

        renderer.on_resize(5, 3);
        assert_eq!(renderer.image_data().len(), 15);
        // Old contents are not kept
        assert!(renderer.image_data().iter().all(|&p| p == 0));

        let image = renderer.final_image().unwrap();
        assert_eq!((image.width(), image.height()), (5, 3));
    }

    #[test]
    fn test_zero_size_renders_nothing() {
        let mut renderer = renderer(0, 4);
        renderer.render(&Scene::default_scene(), &camera(0, 4));

        assert!(renderer.image_data().is_empty());
        assert_eq!(renderer.frame_index(), 1);
        assert!(renderer.final_image().unwrap().pixels().is_empty());
    }

    #[test]
    fn test_render_does_not_mutate_scene() {
        let scene = Scene::default_scene();
        let before = scene.clone();

        let mut renderer = renderer(6, 6);
        renderer.render(&scene, &camera(6, 6));
        assert_eq!(scene, before);
    }
}
