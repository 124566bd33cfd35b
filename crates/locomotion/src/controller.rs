use glam::{DVec2, Vec3};
use stagehand_common::Pose;
use stagehand_input::InputSnapshot;
use stagehand_render::{CameraRig, FrameTarget, Light, Renderable, ShaderHandle};
use tracing::{debug, trace};

use crate::animation::{self, MotionIntent};
use crate::config::LocomotionConfig;
use crate::state::{LocomotionState, is_grounded};

/// Drives one renderable from input: walking, running, jumping, falling,
/// respawning, plus a third-person camera orbiting it.
///
/// The controller owns the entity and the locomotion state. The camera is
/// lent to [`update`](Self::update) each frame; the controller writes its
/// position and target and nothing else.
pub struct LocomotionController<R: Renderable> {
    entity: R,
    config: LocomotionConfig,
    state: LocomotionState,
    previous_mouse: DVec2,
}

impl<R: Renderable> LocomotionController<R> {
    /// The previous mouse position is seeded from the current cursor so the
    /// first frame sees no mouse motion.
    pub fn new(entity: R, config: LocomotionConfig, input: &InputSnapshot) -> Self {
        let state = LocomotionState::new(&config);
        Self {
            entity,
            config,
            state,
            previous_mouse: input.cursor(),
        }
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn entity(&self) -> &R {
        &self.entity
    }

    pub fn is_grounded(&self) -> bool {
        is_grounded(self.state.position)
    }

    /// Advance one frame.
    pub fn update(&mut self, delta: f32, input: &mut InputSnapshot, camera: &mut CameraRig) {
        let Self {
            entity,
            config,
            state,
            previous_mouse,
        } = self;
        let keys = &config.bindings;

        let scroll = input.consume_scroll() as f32;
        state.zoom_distance = (state.zoom_distance - scroll * delta * config.zoom_speed)
            .clamp(config.min_zoom, config.max_zoom);

        let cursor = input.cursor();
        let mouse = (cursor - *previous_mouse).as_vec2();
        *previous_mouse = cursor;

        if input.button(keys.look) {
            let limit = config.camera_height_limit;
            state.camera_height_offset = (state.camera_height_offset
                + mouse.y * delta / config.height_drag_divisor)
                .clamp(-limit, limit);
        }

        let previewing = input.is_down(keys.preview);
        let pace: i8 = if input.is_down(keys.run) { 2 } else { 1 };
        let intent = MotionIntent {
            x: input.axis(keys.left, keys.right) as i8 * pace,
            z: input.axis(keys.forward, keys.back) as i8 * pace,
        };

        state.orbit_yaw -= mouse.x * delta * config.mouse_sensitivity;
        place_camera(camera, state);

        if !previewing {
            state.facing_yaw = state.orbit_yaw;
        }

        if input.consume(keys.respawn) {
            state.respawn(config.respawn);
            debug!(position = ?state.position, "respawned");
        }

        let next = state.position + Vec3::Y * (state.vertical_velocity * delta);
        if !is_grounded(next) {
            state.vertical_velocity -= config.gravity;
        } else {
            if state.vertical_velocity != 0.0 {
                debug!(velocity = state.vertical_velocity, "landed");
            }
            state.position.y = 0.0;
            state.vertical_velocity = 0.0;
        }

        let probe = state.position - Vec3::Y * config.jump_probe;
        if is_grounded(probe) && input.consume(keys.jump) {
            state.vertical_velocity += config.jump_impulse;
            debug!(velocity = state.vertical_velocity, "jump");
        }

        let facing = state.facing_yaw.to_radians();
        let step = heading(facing) * f32::from(intent.z)
            + heading(facing + std::f32::consts::FRAC_PI_2) * f32::from(intent.x);
        state.position += step * delta;
        state.position.y += state.vertical_velocity * delta;
        if state.position.y < 0.0 {
            state.position.y = 0.0;
        }

        let selection =
            animation::select(intent, state.vertical_velocity, config.diagonal_bias_angle);
        state.animation = selection.state;
        state.diagonal_bias = selection.diagonal_bias;

        let pose = Pose {
            position: state.position + config.mesh_origin_offset,
            rotation: Vec3::new(0.0, 0.0, state.facing_yaw)
                + config.model_correction
                + Vec3::new(0.0, 0.0, state.diagonal_bias),
            scale: entity.pose().scale,
        };
        entity.set_pose(pose);
        entity.set_animation(config.clips.clip(state.animation));
        entity.update(delta * config.animation_speed);

        trace!(
            position = ?state.position,
            velocity = state.vertical_velocity,
            yaw = state.orbit_yaw,
            animation = state.animation.label(),
            "locomotion"
        );
    }

    pub fn draw(
        &self,
        target: &mut dyn FrameTarget,
        shader: ShaderHandle,
        camera: &CameraRig,
        lights: &[Light],
    ) {
        self.entity.draw(target, shader, camera, lights);
    }
}

/// Unit vector on the ground plane for a yaw in radians. Yaw 0 points at +Z.
fn heading(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Put the camera on its orbit around the feet and look at them.
fn place_camera(camera: &mut CameraRig, state: &LocomotionState) {
    let p = state.position;
    let zoom = state.zoom_distance;
    let dir = heading(state.orbit_yaw.to_radians());
    camera.target = p;
    camera.position = Vec3::new(
        p.x + zoom * dir.x,
        p.y + zoom * state.camera_height_offset,
        p.z + zoom * dir.z,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationState, Heading};
    use stagehand_input::{InputEvent, Key, MouseButton};
    use stagehand_render::{MeshSource, Model, TextFrame};

    fn spider() -> Model {
        Model::new("spider", MeshSource::Asset("spider.fbx".into()))
            .with_pose(Pose::default().with_scale(Vec3::splat(0.1)))
    }

    fn grounded_config() -> LocomotionConfig {
        LocomotionConfig {
            spawn: Vec3::ZERO,
            ..LocomotionConfig::default()
        }
    }

    fn controller(config: LocomotionConfig) -> (LocomotionController<Model>, InputSnapshot) {
        let input = InputSnapshot::new();
        (LocomotionController::new(spider(), config, &input), input)
    }

    fn press(input: &mut InputSnapshot, key: Key) {
        input.apply(&InputEvent::KeyDown { key, repeat: false });
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn first_frame_from_spawn_starts_falling() {
        let (mut c, mut input) = controller(LocomotionConfig::default());
        let mut cam = CameraRig::default();

        c.update(0.016, &mut input, &mut cam);

        let s = c.state();
        assert!((s.vertical_velocity + 0.1).abs() < 1e-6);
        assert!((s.position.y - (1.0 - 0.1 * 0.016)).abs() < 1e-6);
        assert_eq!(s.animation, AnimationState::Fall);
        assert_eq!(c.entity().current_animation(), Some("Spider_Armature|fall"));
    }

    #[test]
    fn zero_delta_frame_does_not_move() {
        let (mut c, mut input) = controller(LocomotionConfig::default());
        let mut cam = CameraRig::default();
        c.update(0.0, &mut input, &mut cam);
        assert_eq!(c.state().position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn never_below_ground() {
        let (mut c, mut input) = controller(LocomotionConfig::default());
        let mut cam = CameraRig::default();
        let deltas = [0.0, 0.016, 0.5, 3.0, 0.001, 10.0, 0.033];

        for (i, delta) in deltas.iter().cycle().take(200).enumerate() {
            if i % 7 == 0 {
                press(&mut input, Key::Space);
            }
            if i % 31 == 0 {
                press(&mut input, Key::R);
            }
            c.update(*delta, &mut input, &mut cam);
            let position = c.state().position;
            assert!(position.y >= 0.0, "frame {i}: {position:?}");
        }
    }

    #[test]
    fn lands_and_goes_idle() {
        let (mut c, mut input) = controller(LocomotionConfig::default());
        let mut cam = CameraRig::default();
        for _ in 0..500 {
            c.update(0.016, &mut input, &mut cam);
        }
        let s = c.state();
        assert_eq!(s.position.y, 0.0);
        assert_eq!(s.vertical_velocity, 0.0);
        assert_eq!(s.animation, AnimationState::Idle);
        assert!(c.is_grounded());
    }

    #[test]
    fn zoom_is_clamped_and_scroll_consumed() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();

        input.apply(&InputEvent::Scroll { dy: 1000.0 });
        c.update(0.1, &mut input, &mut cam);
        assert_eq!(c.state().zoom_distance, 0.5);
        assert_eq!(input.scroll(), 0.0);

        input.apply(&InputEvent::Scroll { dy: -1000.0 });
        c.update(0.1, &mut input, &mut cam);
        assert_eq!(c.state().zoom_distance, 4.0);
    }

    #[test]
    fn camera_height_moves_only_while_looking() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();

        input.apply(&InputEvent::MouseMotion { dx: 0.0, dy: 5.0 });
        c.update(0.1, &mut input, &mut cam);
        assert!((c.state().camera_height_offset - 0.3).abs() < 1e-6);

        input.apply(&InputEvent::Button {
            button: MouseButton::Right,
            pressed: true,
        });
        input.apply(&InputEvent::MouseMotion { dx: 0.0, dy: 5.0 });
        c.update(0.1, &mut input, &mut cam);
        assert!((c.state().camera_height_offset - 0.35).abs() < 1e-6);

        input.apply(&InputEvent::MouseMotion {
            dx: 0.0,
            dy: 1000.0,
        });
        c.update(0.1, &mut input, &mut cam);
        assert_eq!(c.state().camera_height_offset, 1.0);

        input.apply(&InputEvent::Button {
            button: MouseButton::Right,
            pressed: false,
        });
        input.apply(&InputEvent::MouseMotion {
            dx: 0.0,
            dy: -1000.0,
        });
        c.update(0.1, &mut input, &mut cam);
        assert_eq!(c.state().camera_height_offset, 1.0);
    }

    #[test]
    fn first_frame_ignores_existing_cursor_position() {
        let mut input = InputSnapshot::new();
        input.apply(&InputEvent::CursorMoved { x: 640.0, y: 360.0 });
        let mut c = LocomotionController::new(spider(), grounded_config(), &input);
        let mut cam = CameraRig::default();

        c.update(0.016, &mut input, &mut cam);
        assert_eq!(c.state().orbit_yaw, 0.0);

        input.apply(&InputEvent::CursorMoved { x: 650.0, y: 360.0 });
        c.update(0.5, &mut input, &mut cam);
        assert!((c.state().orbit_yaw + 10.0).abs() < 1e-5);
    }

    #[test]
    fn preview_freezes_facing_until_release() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();

        press(&mut input, Key::LeftControl);
        input.apply(&InputEvent::MouseMotion { dx: 10.0, dy: 0.0 });
        c.update(1.0, &mut input, &mut cam);
        assert_eq!(c.state().orbit_yaw, -20.0);
        assert_eq!(c.state().facing_yaw, 0.0);

        input.apply(&InputEvent::KeyUp(Key::LeftControl));
        c.update(1.0, &mut input, &mut cam);
        assert_eq!(c.state().facing_yaw, -20.0);
    }

    #[test]
    fn forward_key_moves_toward_negative_z() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();

        press(&mut input, Key::W);
        c.update(0.5, &mut input, &mut cam);
        assert!(close(c.state().position, Vec3::new(0.0, 0.0, -0.5)));
        assert_eq!(c.state().animation, AnimationState::Walk(Heading::Back));

        input.apply(&InputEvent::KeyUp(Key::W));
        press(&mut input, Key::D);
        press(&mut input, Key::LeftShift);
        c.update(0.5, &mut input, &mut cam);
        assert!(close(c.state().position, Vec3::new(1.0, 0.0, -0.5)));
        assert_eq!(c.state().animation, AnimationState::Run(Heading::Right));
    }

    #[test]
    fn movement_follows_facing() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();

        // Turn to yaw 90 degrees.
        input.apply(&InputEvent::MouseMotion { dx: -45.0, dy: 0.0 });
        c.update(1.0, &mut input, &mut cam);
        assert_eq!(c.state().facing_yaw, 90.0);

        press(&mut input, Key::S);
        c.update(0.25, &mut input, &mut cam);
        assert!(close(c.state().position, Vec3::new(0.25, 0.0, 0.0)));
    }

    #[test]
    fn diagonal_bias_is_applied_then_cleared() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();

        press(&mut input, Key::S);
        press(&mut input, Key::D);
        c.update(0.1, &mut input, &mut cam);
        assert_eq!(c.state().diagonal_bias, 45.0);
        assert_eq!(c.entity().pose().rotation, Vec3::new(-90.0, 0.0, 45.0));

        input.release_all();
        c.update(0.1, &mut input, &mut cam);
        assert_eq!(c.state().diagonal_bias, 0.0);
        assert_eq!(c.state().animation, AnimationState::Idle);
    }

    #[test]
    fn jump_fires_once_per_press() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();

        press(&mut input, Key::Space);
        c.update(0.016, &mut input, &mut cam);
        assert!((c.state().vertical_velocity - 4.0).abs() < 1e-6);
        assert!(!input.is_down(Key::Space));

        // A repeat while held does not re-arm the trigger.
        input.apply(&InputEvent::KeyDown {
            key: Key::Space,
            repeat: true,
        });
        c.update(0.016, &mut input, &mut cam);
        assert!(c.state().vertical_velocity < 4.0);
    }

    #[test]
    fn airborne_jump_waits_for_the_probe() {
        let config = LocomotionConfig {
            spawn: Vec3::new(0.0, 0.3, 0.0),
            ..LocomotionConfig::default()
        };
        let (mut c, mut input) = controller(config);
        let mut cam = CameraRig::default();
        press(&mut input, Key::Space);

        let mut fired = false;
        for _ in 0..500 {
            let before = c.state().position.y;
            c.update(0.016, &mut input, &mut cam);
            if !input.is_down(Key::Space) {
                assert!(before <= 0.1);
                fired = true;
                break;
            }
        }
        assert!(fired);
    }

    #[test]
    fn respawn_resets_position_once() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();

        press(&mut input, Key::W);
        c.update(1.0, &mut input, &mut cam);
        input.release_all();

        press(&mut input, Key::R);
        c.update(0.0, &mut input, &mut cam);
        assert_eq!(c.state().position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(c.state().vertical_velocity, -0.1);
        assert!(!input.is_down(Key::R));
    }

    #[test]
    fn pose_pushes_offset_correction_and_scale() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();
        c.update(0.016, &mut input, &mut cam);

        let pose = c.entity().pose();
        assert_eq!(pose.position, Vec3::new(0.0, 0.2, 0.0));
        assert_eq!(pose.rotation, Vec3::new(-90.0, 0.0, 0.0));
        assert_eq!(pose.scale, Vec3::splat(0.1));
        let clip = c.entity().current_animation();
        assert_eq!(clip, Some("Spider_Armature|breathe"));
        let time = c.entity().animation().map(|a| a.time);
        assert!((time.unwrap_or_default() - 0.032).abs() < 1e-6);
    }

    #[test]
    fn camera_orbits_behind_feet() {
        let (mut c, mut input) = controller(LocomotionConfig::default());
        let mut cam = CameraRig::default();
        c.update(0.0, &mut input, &mut cam);

        assert_eq!(cam.target, Vec3::new(0.0, 1.0, 0.0));
        assert!(close(cam.position, Vec3::new(0.0, 1.6, 2.0)));
    }

    #[test]
    fn draw_delegates_to_entity() {
        let (mut c, mut input) = controller(grounded_config());
        let mut cam = CameraRig::default();
        c.update(0.016, &mut input, &mut cam);

        let mut frame = TextFrame::new();
        frame.clear([0.0; 4]);
        c.draw(&mut frame, ShaderHandle(7), &cam, &[]);
        frame.present();
        assert_eq!(frame.presented()[0].label, "spider");
        assert_eq!(frame.presented()[0].shader, ShaderHandle(7));
    }
}
