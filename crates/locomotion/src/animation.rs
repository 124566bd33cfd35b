use serde::{Deserialize, Serialize};

/// Direction variant of a walk or run clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Front,
    Back,
    Left,
    Right,
}

/// Discrete animation state derived from continuous motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationState {
    Idle,
    Walk(Heading),
    Run(Heading),
    Fall,
}

impl AnimationState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk(Heading::Front) => "walk-front",
            Self::Walk(Heading::Back) => "walk-back",
            Self::Walk(Heading::Left) => "walk-left",
            Self::Walk(Heading::Right) => "walk-right",
            Self::Run(Heading::Front) => "run-front",
            Self::Run(Heading::Back) => "run-back",
            Self::Run(Heading::Left) => "run-left",
            Self::Run(Heading::Right) => "run-right",
            Self::Fall => "fall",
        }
    }
}

/// Clip names played for each [`AnimationState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationClips {
    pub idle: String,
    pub walk_front: String,
    pub walk_back: String,
    pub walk_left: String,
    pub walk_right: String,
    pub run_front: String,
    pub run_back: String,
    pub run_left: String,
    pub run_right: String,
    pub fall: String,
}

impl Default for AnimationClips {
    fn default() -> Self {
        let clip = |name: &str| format!("Spider_Armature|{name}");
        Self {
            idle: clip("breathe"),
            walk_front: clip("walk_front"),
            walk_back: clip("walk_back"),
            walk_left: clip("walk_left"),
            walk_right: clip("walk_right"),
            run_front: clip("run_front"),
            run_back: clip("run_back"),
            run_left: clip("run_left"),
            run_right: clip("run_right"),
            fall: clip("fall"),
        }
    }
}

impl AnimationClips {
    pub fn clip(&self, state: AnimationState) -> &str {
        match state {
            AnimationState::Idle => &self.idle,
            AnimationState::Walk(Heading::Front) => &self.walk_front,
            AnimationState::Walk(Heading::Back) => &self.walk_back,
            AnimationState::Walk(Heading::Left) => &self.walk_left,
            AnimationState::Walk(Heading::Right) => &self.walk_right,
            AnimationState::Run(Heading::Front) => &self.run_front,
            AnimationState::Run(Heading::Back) => &self.run_back,
            AnimationState::Run(Heading::Left) => &self.run_left,
            AnimationState::Run(Heading::Right) => &self.run_right,
            AnimationState::Fall => &self.fall,
        }
    }
}

/// Horizontal intent for one frame. Each component is in `-2..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionIntent {
    pub x: i8,
    pub z: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Z,
}

/// `(axis, positive, magnitude) -> state`. Positive Z is "front" because
/// the forward key lowers Z intent.
const TABLE: [((Axis, bool, u8), AnimationState); 8] = [
    ((Axis::Z, true, 1), AnimationState::Walk(Heading::Front)),
    ((Axis::Z, false, 1), AnimationState::Walk(Heading::Back)),
    ((Axis::Z, true, 2), AnimationState::Run(Heading::Front)),
    ((Axis::Z, false, 2), AnimationState::Run(Heading::Back)),
    ((Axis::X, true, 1), AnimationState::Walk(Heading::Right)),
    ((Axis::X, false, 1), AnimationState::Walk(Heading::Left)),
    ((Axis::X, true, 2), AnimationState::Run(Heading::Right)),
    ((Axis::X, false, 2), AnimationState::Run(Heading::Left)),
];

fn lookup(axis: Axis, value: i8) -> AnimationState {
    let key = (axis, value > 0, value.unsigned_abs());
    TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(AnimationState::Idle, |(_, state)| *state)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSelection {
    pub state: AnimationState,
    /// Extra yaw, degrees, applied to the mesh while moving diagonally.
    pub diagonal_bias: f32,
}

/// Pick the animation for this frame's intent and vertical velocity.
///
/// Z intent wins over X intent. Any vertical velocity forces [`Fall`]
/// regardless of intent; the diagonal bias is still reported.
///
/// [`Fall`]: AnimationState::Fall
pub fn select(intent: MotionIntent, vertical_velocity: f32, bias_angle: f32) -> AnimationSelection {
    let diagonal_bias = if intent.x != 0 && intent.z != 0 {
        f32::from(intent.x.signum() * intent.z.signum()) * bias_angle
    } else {
        0.0
    };

    let mut state = if intent.z != 0 {
        lookup(Axis::Z, intent.z)
    } else if intent.x != 0 {
        lookup(Axis::X, intent.x)
    } else {
        AnimationState::Idle
    };

    if vertical_velocity != 0.0 {
        state = AnimationState::Fall;
    }

    AnimationSelection {
        state,
        diagonal_bias,
    }
}
