use serde::{Deserialize, Serialize};

/// Keyboard keys the scene runner reacts to.
///
/// Platform layers translate their own key codes into this set and drop
/// everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    B,
    F,
    R,
    Space,
    LeftShift,
    LeftControl,
    Escape,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
