use crate::snapshot::InputSnapshot;

/// Something that refreshes the input snapshot between frames.
///
/// Polling must not block: the scene loop calls it once per frame, after
/// presenting.
pub trait InputSource {
    fn poll(&mut self, input: &mut InputSnapshot);
}

/// A source that never produces input. The loop only ends through a frame
/// limit when driven by it.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self, _input: &mut InputSnapshot) {}
}
