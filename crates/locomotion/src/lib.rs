//! Player locomotion and third-person orbit camera.
//!
//! Fuses the input snapshot into walking, running, jumping and falling
//! against a flat ground plane at `y = 0`, orbits a camera around the
//! player, and picks the animation clip from the resulting motion.
//!
//! # Invariants
//! - `position.y >= 0` after every update.
//! - Zoom and camera height stay inside their configured clamps.
//! - Jump, respawn and scroll are consumed when acted on, never replayed.
//! - The animation state is a pure function of horizontal intent and
//!   vertical velocity; falling overrides everything else.

mod animation;
mod config;
mod controller;
mod state;

pub use animation::{
    AnimationClips, AnimationSelection, AnimationState, Heading, MotionIntent, select,
};
pub use config::LocomotionConfig;
pub use controller::LocomotionController;
pub use state::{LocomotionState, is_grounded};

pub fn crate_info() -> &'static str {
    "stagehand-locomotion v0.1.0"
}
