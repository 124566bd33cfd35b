//! Scripted input for headless runs.
//!
//! A script is a YAML list of steps. Each step stays in effect for `frames`
//! polls:
//!
//! ```yaml
//! - frames: 30
//!   hold: [S, LeftShift]
//! - tap: [Space]
//! - frames: 20
//!   buttons: [Right]
//!   mouse: [4.0, -1.0]
//!   scroll: 0.5
//! ```
//!
//! `hold` keys are pressed when the step starts and released when a later
//! step no longer lists them. `tap` keys are pressed once and released on the
//! following poll. `mouse` and `scroll` are applied on every poll of the step.
//! After the last step the source requests close.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use crate::event::InputEvent;
use crate::key::{Key, MouseButton};
use crate::snapshot::InputSnapshot;
use crate::source::InputSource;

/// Errors from loading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("input script has no steps")]
    Empty,
}

/// One step of an input script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub frames: u32,
    pub hold: Vec<Key>,
    pub tap: Vec<Key>,
    pub buttons: Vec<MouseButton>,
    /// Relative pointer motion per frame.
    pub mouse: [f64; 2],
    /// Wheel movement per frame.
    pub scroll: f64,
}

impl Default for ScriptStep {
    fn default() -> Self {
        Self {
            frames: 1,
            hold: Vec::new(),
            tap: Vec::new(),
            buttons: Vec::new(),
            mouse: [0.0, 0.0],
            scroll: 0.0,
        }
    }
}

/// Replays a script of [`ScriptStep`]s, one poll per frame.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    step: usize,
    frame_in_step: u32,
    held: BTreeSet<Key>,
    held_buttons: BTreeSet<MouseButton>,
    tapped: Vec<Key>,
    finished: bool,
}

impl ScriptedInput {
    pub fn new(steps: Vec<ScriptStep>) -> Result<Self, ScriptError> {
        if steps.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(Self {
            steps,
            step: 0,
            frame_in_step: 0,
            held: BTreeSet::new(),
            held_buttons: BTreeSet::new(),
            tapped: Vec::new(),
            finished: false,
        })
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ScriptError> {
        let steps: Vec<ScriptStep> = serde_yaml::from_str(source)?;
        Self::new(steps)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    /// Total number of polls the script covers before requesting close.
    pub fn frame_count(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.frames.max(1))).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn enter_step(&mut self, input: &mut InputSnapshot) {
        let step = &self.steps[self.step];
        debug!(step = self.step, frames = step.frames, "input script step");

        let wanted: BTreeSet<Key> = step.hold.iter().copied().collect();
        for key in self.held.difference(&wanted) {
            input.apply(&InputEvent::KeyUp(*key));
        }
        for key in wanted.difference(&self.held) {
            input.apply(&InputEvent::KeyDown {
                key: *key,
                repeat: false,
            });
        }
        self.held = wanted;

        let wanted_buttons: BTreeSet<MouseButton> = step.buttons.iter().copied().collect();
        for button in self.held_buttons.difference(&wanted_buttons) {
            input.apply(&InputEvent::Button {
                button: *button,
                pressed: false,
            });
        }
        for button in wanted_buttons.difference(&self.held_buttons) {
            input.apply(&InputEvent::Button {
                button: *button,
                pressed: true,
            });
        }
        self.held_buttons = wanted_buttons;

        for key in &step.tap {
            input.apply(&InputEvent::KeyDown {
                key: *key,
                repeat: false,
            });
        }
        self.tapped = step.tap.clone();
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, input: &mut InputSnapshot) {
        if self.finished {
            return;
        }

        for key in std::mem::take(&mut self.tapped) {
            if !self.held.contains(&key) {
                input.apply(&InputEvent::KeyUp(key));
            }
        }

        if self.step >= self.steps.len() {
            input.apply(&InputEvent::CloseRequested);
            self.finished = true;
            return;
        }

        if self.frame_in_step == 0 {
            self.enter_step(input);
        }

        let step = &self.steps[self.step];
        let [dx, dy] = step.mouse;
        if dx != 0.0 || dy != 0.0 {
            input.apply(&InputEvent::MouseMotion { dx, dy });
        }
        if step.scroll != 0.0 {
            input.apply(&InputEvent::Scroll { dy: step.scroll });
        }

        self.frame_in_step += 1;
        if self.frame_in_step >= step.frames.max(1) {
            self.step += 1;
            self.frame_in_step = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn empty_script_is_rejected() {
        assert!(matches!(
            ScriptedInput::from_yaml_str("[]"),
            Err(ScriptError::Empty)
        ));
    }

    #[test]
    fn bad_yaml_is_reported() {
        assert!(matches!(
            ScriptedInput::from_yaml_str("- frames: lots"),
            Err(ScriptError::Yaml(_))
        ));
    }

    #[test]
    fn hold_persists_for_step_then_releases() {
        let mut script =
            ScriptedInput::from_yaml_str("- frames: 2\n  hold: [W]\n- frames: 1\n").unwrap();
        let mut input = InputSnapshot::new();

        script.poll(&mut input);
        assert!(input.is_down(Key::W));
        script.poll(&mut input);
        assert!(input.is_down(Key::W));
        script.poll(&mut input);
        assert!(!input.is_down(Key::W));
    }

    #[test]
    fn held_key_is_not_repressed_across_steps() {
        let yaml = "- hold: [Space]\n- hold: [Space]\n  mouse: [1.0, 0.0]\n";
        let mut script = ScriptedInput::from_yaml_str(yaml).unwrap();
        let mut input = InputSnapshot::new();

        script.poll(&mut input);
        assert!(input.consume(Key::Space));
        script.poll(&mut input);
        assert!(!input.is_down(Key::Space));
    }

    #[test]
    fn tap_releases_on_next_poll() {
        let mut script = ScriptedInput::from_yaml_str("- tap: [Space]\n- frames: 1\n").unwrap();
        let mut input = InputSnapshot::new();

        script.poll(&mut input);
        assert!(input.is_down(Key::Space));
        script.poll(&mut input);
        assert!(!input.is_down(Key::Space));
    }

    #[test]
    fn mouse_and_scroll_apply_every_frame() {
        let mut script = ScriptedInput::from_yaml_str(
            "- frames: 3\n  buttons: [Right]\n  mouse: [2.0, -1.0]\n  scroll: 0.5\n",
        )
        .unwrap();
        let mut input = InputSnapshot::new();
        for _ in 0..3 {
            script.poll(&mut input);
        }
        assert!(input.button(MouseButton::Right));
        assert_eq!(input.cursor(), DVec2::new(6.0, -3.0));
        assert_eq!(input.scroll(), 1.5);
    }

    #[test]
    fn close_requested_after_last_step() {
        let mut script = ScriptedInput::from_yaml_str("- frames: 2\n").unwrap();
        assert_eq!(script.frame_count(), 2);
        let mut input = InputSnapshot::new();

        script.poll(&mut input);
        script.poll(&mut input);
        assert!(!input.close_requested());
        script.poll(&mut input);
        assert!(input.close_requested());
        assert!(script.is_finished());
    }
}
