//! Shared types for the stagehand scene runner.
//!
//! # Invariants
//! - Rotations are Euler angles in degrees, composed as `Rx * Ry * Rz`.

pub mod types;

pub use types::Pose;
