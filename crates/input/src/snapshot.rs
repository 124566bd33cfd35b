use glam::DVec2;
use std::collections::BTreeSet;

use crate::event::InputEvent;
use crate::key::{Key, MouseButton};

/// Input state as seen by one frame's update.
///
/// The runner owns a single snapshot for the lifetime of the scene, folds
/// platform events into it between frames, and lends it `&mut` to the update
/// step. Consumers clear one-shot triggers explicitly with [`consume`] and
/// [`consume_scroll`]; anything left unconsumed is seen again next frame.
///
/// [`consume`]: InputSnapshot::consume
/// [`consume_scroll`]: InputSnapshot::consume_scroll
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    keys: BTreeSet<Key>,
    buttons: BTreeSet<MouseButton>,
    cursor: DVec2,
    scroll: f64,
    close_requested: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one platform event into the snapshot.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, repeat } => {
                // Auto-repeat must not re-arm a key that was consumed while held.
                if !repeat {
                    self.keys.insert(*key);
                }
            }
            InputEvent::KeyUp(key) => {
                self.keys.remove(key);
            }
            InputEvent::CursorMoved { x, y } => {
                self.cursor = DVec2::new(*x, *y);
            }
            InputEvent::MouseMotion { dx, dy } => {
                self.cursor += DVec2::new(*dx, *dy);
            }
            InputEvent::Button { button, pressed } => {
                if *pressed {
                    self.buttons.insert(*button);
                } else {
                    self.buttons.remove(button);
                }
            }
            InputEvent::Scroll { dy } => {
                self.scroll += dy;
            }
            InputEvent::FocusLost => {
                self.release_all();
            }
            InputEvent::CloseRequested => {
                self.close_requested = true;
            }
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// `1.0` when only `positive` is held, `-1.0` when only `negative` is.
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        f32::from(u8::from(self.is_down(positive))) - f32::from(u8::from(self.is_down(negative)))
    }

    /// Returns whether `key` was down and clears it.
    pub fn consume(&mut self, key: Key) -> bool {
        self.keys.remove(&key)
    }

    pub fn button(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    /// Scroll accumulated since the last [`consume_scroll`](Self::consume_scroll).
    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn consume_scroll(&mut self) -> f64 {
        std::mem::take(&mut self.scroll)
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Release every key and button. Cursor position is kept.
    pub fn release_all(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }
}
