use serde::{Deserialize, Serialize};

use crate::key::{Key, MouseButton};

/// Which physical inputs drive each scene action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    pub forward: Key,
    pub back: Key,
    pub left: Key,
    pub right: Key,
    /// Held: doubles horizontal intent.
    pub run: Key,
    /// Held: camera orbits without turning the creature.
    pub preview: Key,
    /// One-shot.
    pub jump: Key,
    /// One-shot teleport back to the respawn point.
    pub respawn: Key,
    pub quit: Key,
    /// One-shot switch for the directional light.
    pub toggle_sun: Key,
    /// One-shot switch for the camera-mounted spot lights' range.
    pub toggle_lamp: Key,
    /// Held: vertical mouse motion adjusts camera height.
    pub look: MouseButton,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            back: Key::S,
            left: Key::A,
            right: Key::D,
            run: Key::LeftShift,
            preview: Key::LeftControl,
            jump: Key::Space,
            respawn: Key::R,
            quit: Key::Escape,
            toggle_sun: Key::B,
            toggle_lamp: Key::F,
            look: MouseButton::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_wasd() {
        let b = Bindings::default();
        assert_eq!(b.forward, Key::W);
        assert_eq!(b.back, Key::S);
        assert_eq!(b.left, Key::A);
        assert_eq!(b.right, Key::D);
        assert_eq!(b.look, MouseButton::Right);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let b: Bindings = serde_yaml::from_str("jump: F\n").unwrap();
        assert_eq!(b.jump, Key::F);
        assert_eq!(b.respawn, Key::R);
    }
}
