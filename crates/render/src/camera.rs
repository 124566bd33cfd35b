use glam::{Mat4, Vec3};

/// Look-at camera: position and target are written by whoever drives the
/// camera, the basis vectors are derived in [`update`](CameraRig::update).
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    front: Vec3,
    up: Vec3,
    right: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO)
    }
}

impl CameraRig {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            position,
            target,
            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
        };
        camera.update(0.0);
        camera
    }

    /// Recompute front/right/up from position and target.
    ///
    /// A degenerate direction (target on the camera, or looking straight
    /// along Y) keeps the previous basis vectors that cannot be derived.
    pub fn update(&mut self, _delta: f32) {
        let dir = self.target - self.position;
        if dir.length_squared() <= f32::EPSILON {
            return;
        }
        self.front = dir.normalize();

        let right = self.front.cross(Vec3::Y);
        if right.length_squared() > f32::EPSILON {
            self.right = right.normalize();
        }
        self.up = self.right.cross(self.front).normalize();
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
