use serde::Serialize;
use stagehand_input::{InputSnapshot, InputSource, Key};
use stagehand_render::FrameTarget;
use tracing::{info, trace};

use crate::clock::Clock;
use crate::scene::Scene;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuitReason {
    Escape,
    CloseRequested,
    FrameLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit(QuitReason),
}

/// What a finished run looked like.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopSummary {
    pub frames: u64,
    pub elapsed: f64,
    pub reason: QuitReason,
    pub position: [f32; 3],
    pub vertical_velocity: f32,
    pub animation: &'static str,
    pub camera: [f32; 3],
}

/// Frame timing, ordering and termination.
///
/// One iteration of [`run_frame`](Self::run_frame) is: quit check, clear,
/// update every scene member, draw every scene member, present, escape
/// check, input poll, then measure the frame for the next iteration. The
/// first frame therefore always runs with `delta = 0`.
pub struct SceneLoop<C: Clock> {
    clock: C,
    quit_key: Key,
    frame_limit: Option<u64>,
    delta: f32,
    origin: Option<f64>,
    elapsed: f64,
    frame: u64,
    quit: Option<QuitReason>,
}

impl<C: Clock> SceneLoop<C> {
    pub fn new(clock: C, quit_key: Key) -> Self {
        Self {
            clock,
            quit_key,
            frame_limit: None,
            delta: 0.0,
            origin: None,
            elapsed: 0.0,
            frame: 0,
            quit: None,
        }
    }

    pub fn with_frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = limit;
        self
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Delta the next frame will run with.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn quit_reason(&self) -> Option<QuitReason> {
        self.quit
    }

    /// Run one frame unless a quit signal is already pending.
    ///
    /// `poll` is handed the snapshot after present; it should fold in
    /// whatever input arrived during the frame.
    pub fn run_frame(
        &mut self,
        scene: &mut Scene,
        input: &mut InputSnapshot,
        target: &mut dyn FrameTarget,
        poll: impl FnOnce(&mut InputSnapshot),
    ) -> FrameOutcome {
        if self.quit.is_none() && input.close_requested() {
            self.quit = Some(QuitReason::CloseRequested);
        }
        if let Some(reason) = self.quit {
            return FrameOutcome::Quit(reason);
        }

        let frame_start = self.clock.now();
        let origin = *self.origin.get_or_insert(frame_start);
        let time = (frame_start - origin) as f32;

        target.clear(scene.clear_color());
        scene.advance(self.delta, time, input);
        scene.draw(target);
        target.present();

        if input.is_down(self.quit_key) {
            self.quit = Some(QuitReason::Escape);
        }
        poll(input);

        let frame_end = self.clock.now();
        self.delta = (frame_end - frame_start) as f32;
        self.elapsed = frame_end - origin;
        self.frame += 1;
        trace!(frame = self.frame, delta = self.delta, "frame");

        if self.quit.is_none() && self.frame_limit.is_some_and(|limit| self.frame >= limit) {
            self.quit = Some(QuitReason::FrameLimit);
        }
        FrameOutcome::Continue
    }

    /// Run frames until a quit signal, polling `source` once per frame.
    pub fn run(
        &mut self,
        scene: &mut Scene,
        input: &mut InputSnapshot,
        target: &mut dyn FrameTarget,
        source: &mut dyn InputSource,
    ) -> LoopSummary {
        info!(frame_limit = ?self.frame_limit, "scene loop started");
        let reason = loop {
            match self.run_frame(scene, input, target, |input| source.poll(input)) {
                FrameOutcome::Continue => {}
                FrameOutcome::Quit(reason) => break reason,
            }
        };
        let summary = self.summary(scene, reason);
        info!(frames = summary.frames, ?reason, "scene loop stopped");
        summary
    }

    pub fn summary(&self, scene: &Scene, reason: QuitReason) -> LoopSummary {
        let state = scene.player().state();
        LoopSummary {
            frames: self.frame,
            elapsed: self.elapsed,
            reason,
            position: state.position.to_array(),
            vertical_velocity: state.vertical_velocity,
            animation: state.animation.label(),
            camera: scene.camera().position.to_array(),
        }
    }
}
