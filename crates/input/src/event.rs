use crate::key::{Key, MouseButton};

/// Platform-independent input events.
///
/// Window backends and scripted sources produce these; `InputSnapshot::apply`
/// folds them into the per-frame state.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed. `repeat` is set for auto-repeat presses while held.
    KeyDown {
        key: Key,
        repeat: bool,
    },
    KeyUp(Key),
    /// Absolute cursor position in window pixels.
    CursorMoved {
        x: f64,
        y: f64,
    },
    /// Relative pointer motion, used while the cursor is grabbed.
    MouseMotion {
        dx: f64,
        dy: f64,
    },
    Button {
        button: MouseButton,
        pressed: bool,
    },
    /// Vertical wheel movement, positive away from the user.
    Scroll {
        dy: f64,
    },
    FocusLost,
    CloseRequested,
}
