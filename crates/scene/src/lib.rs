//! Scene assembly and the per-frame scene loop.
//!
//! # Invariants
//! - Within a frame every member is updated before any member is drawn.
//! - Update and draw order is fixed: floor, player, lights.
//! - A frame runs with the duration of the previous frame; frame 0 gets 0.
//! - Quit is only observed at the top of an iteration, so a started frame
//!   always completes.

mod clock;
mod config;
mod lights;
mod scene;
mod scene_loop;

pub use clock::{Clock, SimulatedClock, SystemClock};
pub use config::{
    ConfigError, FloorConfig, LightingConfig, OrbitConfig, PlayerConfig, SceneConfig, ShaderSet,
    WindowConfig,
};
pub use lights::LightRig;
pub use scene::Scene;
pub use scene_loop::{FrameOutcome, LoopSummary, QuitReason, SceneLoop};

pub fn crate_info() -> &'static str {
    "stagehand-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
