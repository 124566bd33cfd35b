use glam::Vec3;
use serde::Serialize;

use crate::animation::AnimationState;
use crate::config::LocomotionConfig;

/// Ground test against the flat world plane. Exact, no tolerance.
pub fn is_grounded(position: Vec3) -> bool {
    position.y <= 0.0
}

/// Everything the controller carries from one frame to the next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocomotionState {
    /// Feet position in world space.
    pub position: Vec3,
    pub vertical_velocity: f32,
    /// Degrees, unbounded.
    pub orbit_yaw: f32,
    /// Degrees. Follows `orbit_yaw` except while previewing.
    pub facing_yaw: f32,
    pub zoom_distance: f32,
    pub camera_height_offset: f32,
    pub animation: AnimationState,
    /// Recomputed every frame from the current intent.
    pub diagonal_bias: f32,
}

impl LocomotionState {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            position: config.spawn,
            vertical_velocity: 0.0,
            orbit_yaw: 0.0,
            facing_yaw: 0.0,
            zoom_distance: config.initial_zoom.clamp(config.min_zoom, config.max_zoom),
            camera_height_offset: config
                .initial_camera_height
                .clamp(-config.camera_height_limit, config.camera_height_limit),
            animation: AnimationState::Idle,
            diagonal_bias: 0.0,
        }
    }

    /// Teleport to `point` and stop falling. Orientation and camera are kept.
    pub fn respawn(&mut self, point: Vec3) {
        self.position = point;
        self.vertical_velocity = 0.0;
    }
}
