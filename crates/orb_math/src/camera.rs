use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

/// Pinhole camera that caches one primary ray direction per pixel.
///
/// Directions are laid out row-major with row 0 at the top of the image,
/// indexed `x + y * width`, and are unit length. They only change when the
/// viewport is resized or the camera is moved.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    /// Vertical field of view in degrees
    fov_y: f32,
    near: f32,
    far: f32,

    viewport_width: u32,
    viewport_height: u32,

    // Cached matrices
    projection: Mat4,
    inverse_projection: Mat4,
    view: Mat4,
    inverse_view: Mat4,

    ray_directions: Vec<Vec3>,
}

impl Camera {
    /// Create a new camera with no viewport. Call [`Camera::on_resize`]
    /// before reading ray directions.
    pub fn new(position: Vec3, forward: Vec3, fov_y: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position,
            forward: forward.normalize_or(Vec3::NEG_Z),
            up: Vec3::Y,
            fov_y,
            near,
            far,
            viewport_width: 0,
            viewport_height: 0,
            projection: Mat4::IDENTITY,
            inverse_projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            inverse_view: Mat4::IDENTITY,
            ray_directions: Vec::new(),
        };
        camera.recalculate_view();
        camera
    }

    /// Camera position, the origin shared by every primary ray.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Normalized viewing direction.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Vertical field of view in degrees.
    #[inline]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Per-pixel primary ray directions, `width * height` entries.
    #[inline]
    pub fn ray_directions(&self) -> &[Vec3] {
        &self.ray_directions
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Get the projection matrix (camera → clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Update the viewport size and rebuild the cached ray directions.
    ///
    /// Does nothing when the size is unchanged. A zero-area viewport leaves
    /// the camera with no ray directions.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == self.viewport_width && height == self.viewport_height {
            return;
        }

        self.viewport_width = width;
        self.viewport_height = height;

        self.recalculate_projection();
        self.recalculate_ray_directions();
    }

    /// Move the camera, keeping its viewing direction.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recalculate_view();
        self.recalculate_ray_directions();
    }

    /// Move and re-aim the camera in one step. A zero `forward` keeps the
    /// current direction.
    pub fn set_view(&mut self, position: Vec3, forward: Vec3) {
        self.position = position;
        if let Some(forward) = forward.try_normalize() {
            self.forward = forward;
        }
        self.recalculate_view();
        self.recalculate_ray_directions();
    }

    /// Point the camera along `forward`. Zero vectors are ignored.
    pub fn look_in(&mut self, forward: Vec3) {
        let Some(forward) = forward.try_normalize() else {
            return;
        };
        self.forward = forward;
        self.recalculate_view();
        self.recalculate_ray_directions();
    }

    fn recalculate_projection(&mut self) {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return;
        }
        let aspect = self.viewport_width as f32 / self.viewport_height as f32;
        self.projection = Mat4::perspective_rh(self.fov_y.to_radians(), aspect, self.near, self.far);
        self.inverse_projection = self.projection.inverse();
    }

    fn recalculate_view(&mut self) {
        // Looking straight up or down makes Y a degenerate up vector
        self.up = if self.forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        self.view = Mat4::look_at_rh(self.position, self.position + self.forward, self.up);
        self.inverse_view = self.view.inverse();
    }

    fn recalculate_ray_directions(&mut self) {
        let width = self.viewport_width;
        let height = self.viewport_height;

        self.ray_directions.clear();
        self.ray_directions.reserve((width as usize) * (height as usize));

        for y in 0..height {
            for x in 0..width {
                // Pixel centre in NDC, +Y up
                let coord = Vec2::new(
                    (x as f32 + 0.5) / width as f32 * 2.0 - 1.0,
                    1.0 - (y as f32 + 0.5) / height as f32 * 2.0,
                );

                let target: Vec4 = self.inverse_projection * Vec4::new(coord.x, coord.y, 1.0, 1.0);
                let view_dir = (target.xyz() / target.w).normalize();
                let direction = self.inverse_view.transform_vector3(view_dir);
                self.ray_directions.push(direction);
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 6.0), Vec3::NEG_Z, 45.0, 0.1, 100.0)
    }
}
