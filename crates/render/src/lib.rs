//! Rendering boundary: camera rig, lights, renderables and frame targets.
//!
//! # Invariants
//! - Shader handles and lights pass through renderables untouched.
//! - A frame target sees `clear`, then draw calls, then `present`.
//! - Mesh loading and animation playback internals stay behind `Renderable`.

mod camera;
mod light;
mod model;
mod renderer;

pub use camera::CameraRig;
pub use light::{Attenuation, Light, LightKind};
pub use model::{AnimationPlayback, Material, MeshSource, Model};
pub use renderer::{DrawCall, DrawRecord, FrameTarget, Renderable, ShaderHandle, TextFrame};

pub fn crate_info() -> &'static str {
    "stagehand-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
