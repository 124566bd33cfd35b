use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial pose of a renderable: position, Euler rotation, scale.
///
/// Rotation components are degrees around X, Y and Z. The matrix applies Z
/// first, so a Z-up mesh can yaw around its own up axis before being stood
/// upright by an X correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Pose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation as a quaternion (`Rx * Ry * Rz`).
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        )
    }

    /// Model matrix: translate * rotate * scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_default_is_identity() {
        let p = Pose::default();
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.rotation, Vec3::ZERO);
        assert_eq!(p.scale, Vec3::ONE);
        assert_eq!(p.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn matrix_translates_origin() {
        let p = Pose::at(Vec3::new(1.0, 2.0, 3.0)).with_scale(Vec3::splat(0.1));
        let origin = p.matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn x_correction_stands_z_up_mesh() {
        let p = Pose {
            rotation: Vec3::new(-90.0, 0.0, 0.0),
            ..Pose::default()
        };
        // A Z-up mesh's up axis ends up pointing along world +Y.
        let up = p.orientation() * Vec3::Z;
        assert!((up - Vec3::Y).length() < 1e-5);
    }
}
