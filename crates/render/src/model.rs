use serde::{Deserialize, Serialize};
use stagehand_common::Pose;

use crate::camera::CameraRig;
use crate::light::Light;
use crate::renderer::{DrawCall, FrameTarget, Renderable, ShaderHandle};

/// Where a model's geometry comes from. Loading is the frame target's job;
/// the model only names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshSource {
    Plane,
    Cube,
    UvSphere,
    Asset(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

/// Current animation clip and how far into it playback is, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlayback {
    pub clip: String,
    pub time: f32,
}

/// A mesh with a material, a pose and an optional animation clip.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub mesh: MeshSource,
    pub material: Material,
    pose: Pose,
    animation: Option<AnimationPlayback>,
}

impl Model {
    pub fn new(name: impl Into<String>, mesh: MeshSource) -> Self {
        Self {
            name: name.into(),
            mesh,
            material: Material::default(),
            pose: Pose::default(),
            animation: None,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_animation(mut self, clip: &str) -> Self {
        self.set_animation(clip);
        self
    }

    pub fn animation(&self) -> Option<&AnimationPlayback> {
        self.animation.as_ref()
    }
}

impl Renderable for Model {
    fn update(&mut self, delta: f32) {
        if let Some(playback) = &mut self.animation {
            playback.time += delta;
        }
    }

    fn draw(
        &self,
        target: &mut dyn FrameTarget,
        shader: ShaderHandle,
        camera: &CameraRig,
        lights: &[Light],
    ) {
        let call = DrawCall {
            label: &self.name,
            shader,
            mesh: &self.mesh,
            pose: self.pose,
            color: self.material.base_color,
            animation: self.animation.as_ref().map(|a| (a.clip.as_str(), a.time)),
        };
        target.draw_mesh(&call, camera, lights);
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    fn current_animation(&self) -> Option<&str> {
        self.animation.as_ref().map(|a| a.clip.as_str())
    }

    /// Switching to a different clip restarts playback; re-selecting the
    /// current clip keeps its time.
    fn set_animation(&mut self, clip: &str) {
        match &mut self.animation {
            Some(playback) if playback.clip == clip => {}
            _ => {
                self.animation = Some(AnimationPlayback {
                    clip: clip.to_string(),
                    time: 0.0,
                });
            }
        }
    }
}
