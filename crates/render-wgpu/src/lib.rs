//! wgpu render backend for stagehand scenes.
//!
//! Renders a grid floor and one instanced cube per draw call, lit by the
//! first directional light and the first point light in the scene.
//!
//! # Invariants
//! - The backend never feeds anything back into scene state.
//! - Surface errors are absorbed in `present`; the frame is dropped.

mod gpu;
mod shaders;
mod surface;

pub use gpu::WgpuRenderer;
pub use surface::{GpuError, SurfaceTarget};
