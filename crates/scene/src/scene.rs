use glam::Vec3;
use stagehand_common::Pose;
use stagehand_input::InputSnapshot;
use stagehand_locomotion::LocomotionController;
use stagehand_render::{CameraRig, FrameTarget, Material, MeshSource, Model, Renderable};
use tracing::info;

use crate::config::{SceneConfig, ShaderSet};
use crate::lights::LightRig;

/// Everything drawn each frame: floor, player, camera and lights.
pub struct Scene {
    floor: Model,
    player: LocomotionController<Model>,
    camera: CameraRig,
    lights: LightRig,
    shaders: ShaderSet,
    clear_color: [f32; 4],
}

impl Scene {
    /// `input` seeds the controller's previous cursor position.
    pub fn from_config(config: &SceneConfig, input: &InputSnapshot) -> Self {
        let floor = Model::new("floor", MeshSource::Plane)
            .with_material(Material {
                base_color: config.floor.color,
            })
            .with_pose(Pose::default().with_scale(config.floor.scale));

        let player_model = Model::new(
            config.player.name.clone(),
            MeshSource::Asset(config.player.asset.clone()),
        )
        .with_material(Material {
            base_color: config.player.color,
        })
        .with_pose(Pose::at(config.locomotion.spawn).with_scale(Vec3::splat(config.player.scale)))
        .with_animation(&config.locomotion.clips.idle);
        let player = LocomotionController::new(player_model, config.locomotion.clone(), input);

        let mut camera = CameraRig::default();
        camera.set_aspect(config.window.width, config.window.height);

        let bindings = &config.locomotion.bindings;
        let lights = LightRig::new(&config.lighting, bindings.toggle_sun, bindings.toggle_lamp);

        info!(
            player = %config.player.name,
            lights = lights.lights().len(),
            "scene assembled"
        );

        Self {
            floor,
            player,
            camera,
            lights,
            shaders: config.shaders,
            clear_color: config.clear_color,
        }
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn player(&self) -> &LocomotionController<Model> {
        &self.player
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Update phase: floor, player, camera, lights.
    pub fn advance(&mut self, delta: f32, time: f32, input: &mut InputSnapshot) {
        self.floor.update(delta);
        self.player.update(delta, input, &mut self.camera);
        self.camera.update(delta);
        self.lights.update(time, input, &self.camera);
    }

    /// Draw phase, same order as [`advance`](Self::advance).
    pub fn draw(&self, target: &mut dyn FrameTarget) {
        let lights = self.lights.lights();
        self.floor
            .draw(target, self.shaders.model, &self.camera, lights);
        self.player
            .draw(target, self.shaders.model, &self.camera, lights);
        self.lights.draw(target, self.shaders.marker, &self.camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_render::TextFrame;

    #[test]
    fn assembles_floor_player_and_sun() {
        let scene = Scene::from_config(&SceneConfig::default(), &InputSnapshot::new());
        assert_eq!(scene.lights().lights().len(), 1);
        assert_eq!(scene.player().state().position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(
            scene.player().entity().current_animation(),
            Some("Spider_Armature|breathe")
        );
        assert!((scene.camera().aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn draws_in_fixed_order() {
        let mut config = SceneConfig::default();
        config.lighting.orbiting_light = Some(Default::default());
        let mut input = InputSnapshot::new();
        let mut scene = Scene::from_config(&config, &input);
        scene.advance(0.016, 0.0, &mut input);

        let mut frame = TextFrame::new();
        frame.clear(scene.clear_color());
        scene.draw(&mut frame);
        frame.present();

        let labels: Vec<_> = frame.presented().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["floor", "spider", "light-marker"]);
        assert_eq!(frame.presented()[0].pose.scale, Vec3::new(10.0, 1.0, 10.0));
        assert_eq!(frame.presented()[2].shader, config.shaders.marker);
    }

    #[test]
    fn camera_basis_follows_player_in_same_frame() {
        let mut input = InputSnapshot::new();
        let mut scene = Scene::from_config(&SceneConfig::default(), &input);
        scene.advance(0.0, 0.0, &mut input);

        let cam = scene.camera();
        assert_eq!(cam.target, Vec3::new(0.0, 1.0, 0.0));
        let expected = (cam.target - cam.position).normalize();
        assert!((cam.front() - expected).length() < 1e-5);
    }
}
