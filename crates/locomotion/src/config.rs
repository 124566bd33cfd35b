use glam::Vec3;
use serde::{Deserialize, Serialize};
use stagehand_input::Bindings;

use crate::animation::AnimationClips;

/// Tuning for [`LocomotionController`](crate::LocomotionController).
///
/// Every field has a default, so a YAML section only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Zoom change per unit of scroll per second.
    pub zoom_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub initial_zoom: f32,
    pub initial_camera_height: f32,
    /// Camera height offset stays within `[-limit, limit]`.
    pub camera_height_limit: f32,
    pub height_drag_divisor: f32,
    pub mouse_sensitivity: f32,
    /// Subtracted from vertical velocity once per airborne frame.
    pub gravity: f32,
    pub jump_impulse: f32,
    /// How far below the feet the jump ground probe looks.
    pub jump_probe: f32,
    pub spawn: Vec3,
    pub respawn: Vec3,
    /// Euler degrees added to the mesh rotation.
    pub model_correction: Vec3,
    pub mesh_origin_offset: Vec3,
    /// Multiplier on `delta` for animation playback.
    pub animation_speed: f32,
    pub diagonal_bias_angle: f32,
    pub clips: AnimationClips,
    pub bindings: Bindings,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            zoom_speed: 5.0,
            min_zoom: 0.5,
            max_zoom: 4.0,
            initial_zoom: 2.0,
            initial_camera_height: 0.3,
            camera_height_limit: 1.0,
            height_drag_divisor: 10.0,
            mouse_sensitivity: 2.0,
            gravity: 0.1,
            jump_impulse: 4.0,
            jump_probe: 0.1,
            spawn: Vec3::new(0.0, 1.0, 0.0),
            respawn: Vec3::new(0.0, 1.0, 0.0),
            model_correction: Vec3::new(-90.0, 0.0, 0.0),
            mesh_origin_offset: Vec3::new(0.0, 0.2, 0.0),
            animation_speed: 2.0,
            diagonal_bias_angle: 45.0,
            clips: AnimationClips::default(),
            bindings: Bindings::default(),
        }
    }
}

impl LocomotionConfig {
    /// Reject values the per-frame clamps cannot absorb.
    pub fn validate(&self) -> Result<(), String> {
        let scalars = [
            ("zoom_speed", self.zoom_speed),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("initial_zoom", self.initial_zoom),
            ("initial_camera_height", self.initial_camera_height),
            ("camera_height_limit", self.camera_height_limit),
            ("height_drag_divisor", self.height_drag_divisor),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("jump_probe", self.jump_probe),
            ("animation_speed", self.animation_speed),
            ("diagonal_bias_angle", self.diagonal_bias_angle),
        ];
        let vectors = [
            ("spawn", self.spawn),
            ("respawn", self.respawn),
            ("model_correction", self.model_correction),
            ("mesh_origin_offset", self.mesh_origin_offset),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be finite"));
        }
        if let Some((name, _)) = vectors.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be finite"));
        }
        if self.min_zoom > self.max_zoom {
            return Err(format!(
                "min_zoom ({}) exceeds max_zoom ({})",
                self.min_zoom, self.max_zoom
            ));
        }
        if self.camera_height_limit < 0.0 {
            return Err(format!(
                "camera_height_limit ({}) must not be negative",
                self.camera_height_limit
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let cfg: LocomotionConfig = serde_yaml::from_str("gravity: 0.2\nmax_zoom: 6.0\n").unwrap();
        assert_eq!(cfg.gravity, 0.2);
        assert_eq!(cfg.max_zoom, 6.0);
        assert_eq!(cfg.min_zoom, 0.5);
        assert_eq!(cfg.jump_impulse, 4.0);
        assert_eq!(cfg.spawn, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LocomotionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_zoom_range_is_rejected() {
        let cfg = LocomotionConfig {
            min_zoom: 5.0,
            max_zoom: 1.0,
            ..LocomotionConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("min_zoom"), "{err}");
    }

    #[test]
    fn negative_height_limit_is_rejected() {
        let cfg = LocomotionConfig {
            camera_height_limit: -1.0,
            ..LocomotionConfig::default()
        };
        assert!(cfg.validate().unwrap_err().contains("camera_height_limit"));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let cfg = LocomotionConfig {
            gravity: f32::NAN,
            ..LocomotionConfig::default()
        };
        assert_eq!(cfg.validate(), Err("gravity must be finite".to_string()));

        let cfg = LocomotionConfig {
            spawn: Vec3::new(0.0, f32::INFINITY, 0.0),
            ..LocomotionConfig::default()
        };
        assert_eq!(cfg.validate(), Err("spawn must be finite".to_string()));
    }
}
