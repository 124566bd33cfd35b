use glam::Vec3;
use serde::{Deserialize, Serialize};
use stagehand_common::Pose;

use crate::camera::CameraRig;
use crate::light::Light;
use crate::model::MeshSource;

/// Opaque shader program reference. Renderables forward it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShaderHandle(pub u32);

/// Everything a frame target needs to draw one mesh.
#[derive(Debug, Clone)]
pub struct DrawCall<'a> {
    pub label: &'a str,
    pub shader: ShaderHandle,
    pub mesh: &'a MeshSource,
    pub pose: Pose,
    pub color: [f32; 4],
    /// Clip name and playback time, for skinned meshes.
    pub animation: Option<(&'a str, f32)>,
}

/// Backend-agnostic frame sink. All frame targets implement this trait.
///
/// A frame is `clear`, any number of `draw_mesh` calls, then `present`.
/// None of these can fail from the caller's point of view: backends handle
/// their own errors so the scene loop stays total.
pub trait FrameTarget {
    fn clear(&mut self, color: [f32; 4]);

    fn draw_mesh(&mut self, call: &DrawCall<'_>, camera: &CameraRig, lights: &[Light]);

    fn present(&mut self);
}

/// Something the scene can update and draw each frame.
pub trait Renderable {
    /// Advance internal state (animation playback) by `delta` seconds.
    fn update(&mut self, delta: f32);

    fn draw(
        &self,
        target: &mut dyn FrameTarget,
        shader: ShaderHandle,
        camera: &CameraRig,
        lights: &[Light],
    );

    fn pose(&self) -> Pose;

    fn set_pose(&mut self, pose: Pose);

    fn current_animation(&self) -> Option<&str>;

    fn set_animation(&mut self, clip: &str);
}

/// Owned copy of a [`DrawCall`], as kept by [`TextFrame`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub label: String,
    pub shader: ShaderHandle,
    pub mesh: MeshSource,
    pub pose: Pose,
    pub color: [f32; 4],
    pub animation: Option<String>,
    pub animation_time: f32,
    pub eye: Vec3,
    pub lights_lit: usize,
}

impl DrawRecord {
    fn capture(call: &DrawCall<'_>, camera: &CameraRig, lights: &[Light]) -> Self {
        Self {
            label: call.label.to_string(),
            shader: call.shader,
            mesh: call.mesh.clone(),
            pose: call.pose,
            color: call.color,
            animation: call.animation.map(|(clip, _)| clip.to_string()),
            animation_time: call.animation.map_or(0.0, |(_, t)| t),
            eye: camera.position,
            lights_lit: lights.iter().filter(|l| l.is_lit()).count(),
        }
    }
}

/// Debug text target.
///
/// Records draw calls instead of rasterising them and renders a
/// human-readable summary of the last presented frame. Used by the headless
/// CLI and by tests of anything that draws.
#[derive(Debug, Default)]
pub struct TextFrame {
    pending: Vec<DrawRecord>,
    presented: Vec<DrawRecord>,
    clear_color: [f32; 4],
    camera: Option<(Vec3, Vec3)>,
    frames_presented: u64,
}

impl TextFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the last presented frame, in submission order.
    pub fn presented(&self) -> &[DrawRecord] {
        &self.presented
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} ===\n",
            self.frames_presented.saturating_sub(1)
        ));
        out.push_str(&format!("Draws: {}\n", self.presented.len()));
        if let Some((eye, target)) = self.camera {
            out.push_str(&format!(
                "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})\n",
                eye.x, eye.y, eye.z, target.x, target.y, target.z
            ));
        }

        for record in &self.presented {
            let p = record.pose.position;
            let r = record.pose.rotation;
            out.push_str(&format!(
                "  [{}] shader={} pos=({:.3}, {:.3}, {:.3}) rot=({:.1}, {:.1}, {:.1})",
                record.label, record.shader.0, p.x, p.y, p.z, r.x, r.y, r.z
            ));
            if let Some(clip) = &record.animation {
                out.push_str(&format!(" clip={clip} t={:.3}", record.animation_time));
            }
            out.push('\n');
        }

        out
    }
}

impl FrameTarget for TextFrame {
    fn clear(&mut self, color: [f32; 4]) {
        self.clear_color = color;
        self.pending.clear();
    }

    fn draw_mesh(&mut self, call: &DrawCall<'_>, camera: &CameraRig, lights: &[Light]) {
        self.camera = Some((camera.position, camera.target));
        self.pending.push(DrawRecord::capture(call, camera, lights));
    }

    fn present(&mut self) {
        self.presented = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}
