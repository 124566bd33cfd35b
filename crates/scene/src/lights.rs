use glam::Vec3;
use stagehand_common::Pose;
use stagehand_input::{InputSnapshot, Key};
use stagehand_render::{
    CameraRig, DrawCall, FrameTarget, Light, LightKind, MeshSource, ShaderHandle,
};
use tracing::debug;

use crate::config::{LightingConfig, OrbitConfig};

/// The scene's light list plus the behaviour attached to it.
///
/// - an optional point light that circles the origin and cycles its colour;
/// - spot lights that ride on the camera;
/// - one-shot toggles for the directional light and for the spot lights;
/// - a small sphere marker drawn at every lit point light.
#[derive(Debug, Clone)]
pub struct LightRig {
    lights: Vec<Light>,
    orbit: Option<(usize, OrbitConfig)>,
    spot_range: f32,
    marker_scale: f32,
    toggle_sun: Key,
    toggle_lamp: Key,
}

impl LightRig {
    pub fn new(config: &LightingConfig, toggle_sun: Key, toggle_lamp: Key) -> Self {
        let mut lights = config.lights.clone();
        let orbit = config.orbiting_light.map(|orbit| {
            let position = Vec3::new(orbit.radius, orbit.height, 0.0);
            lights.push(Light::point(position, orbit.range));
            (lights.len() - 1, orbit)
        });
        Self {
            lights,
            orbit,
            spot_range: config.spot_range,
            marker_scale: config.marker_scale,
            toggle_sun,
            toggle_lamp,
        }
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// `time` is seconds since the scene started.
    pub fn update(&mut self, time: f32, input: &mut InputSnapshot, camera: &CameraRig) {
        if let Some((index, orbit)) = self.orbit {
            let light = &mut self.lights[index];
            light.position = Vec3::new(
                orbit.radius * time.cos(),
                orbit.height,
                orbit.radius * time.sin(),
            );
            light.diffuse = Vec3::new(
                (time.cos() + 1.0) / 2.0,
                ((time * 2.0).cos() + 1.0) / 2.0,
                ((time * -2.0).cos() + 1.0) / 2.0,
            );
        }

        for light in self.lights.iter_mut().filter(|l| l.kind == LightKind::Spot) {
            light.position = camera.position;
            light.direction = camera.front();
        }

        if input.consume(self.toggle_sun) {
            for light in self
                .lights
                .iter_mut()
                .filter(|l| l.kind == LightKind::Directional)
            {
                light.enabled = !light.enabled;
                debug!(enabled = light.enabled, "directional light toggled");
            }
        }

        if input.consume(self.toggle_lamp) {
            let spot_range = self.spot_range;
            for light in self.lights.iter_mut().filter(|l| l.kind == LightKind::Spot) {
                let range = if light.range != 0.0 { 0.0 } else { spot_range };
                light.set_range(range);
                debug!(range, "spot light toggled");
            }
        }
    }

    /// Draw a marker sphere, in the light's colour, at each lit point light.
    pub fn draw(&self, target: &mut dyn FrameTarget, shader: ShaderHandle, camera: &CameraRig) {
        let sphere = MeshSource::UvSphere;
        for light in self
            .lights
            .iter()
            .filter(|l| l.kind == LightKind::Point && l.is_lit())
        {
            let call = DrawCall {
                label: "light-marker",
                shader,
                mesh: &sphere,
                pose: Pose::at(light.position).with_scale(Vec3::splat(self.marker_scale)),
                color: light.diffuse.extend(1.0).to_array(),
                animation: None,
            };
            target.draw_mesh(&call, camera, &self.lights);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_input::InputEvent;
    use stagehand_render::TextFrame;

    fn rig(orbit: bool, extra: &[Light]) -> LightRig {
        let mut config = LightingConfig::default();
        config.lights.extend_from_slice(extra);
        if orbit {
            config.orbiting_light = Some(OrbitConfig::default());
        }
        LightRig::new(&config, Key::B, Key::F)
    }

    fn press(input: &mut InputSnapshot, key: Key) {
        input.apply(&InputEvent::KeyDown { key, repeat: false });
    }

    #[test]
    fn default_rig_is_one_sun() {
        let rig = rig(false, &[]);
        assert_eq!(rig.lights().len(), 1);
        assert_eq!(rig.lights()[0].direction, Vec3::new(-0.2, -1.0, -0.3));
    }

    #[test]
    fn orbiting_light_follows_time() {
        let mut rig = rig(true, &[]);
        let mut input = InputSnapshot::new();
        let cam = CameraRig::default();

        rig.update(0.0, &mut input, &cam);
        let lamp = rig.lights()[1];
        assert_eq!(lamp.position, Vec3::new(3.0, 2.0, 0.0));
        assert_eq!(lamp.diffuse, Vec3::ONE);

        let t = std::f32::consts::FRAC_PI_2;
        rig.update(t, &mut input, &cam);
        let lamp = rig.lights()[1];
        assert!((lamp.position - Vec3::new(0.0, 2.0, 3.0)).length() < 1e-5);
        assert!((lamp.diffuse.x - 0.5).abs() < 1e-5);
        assert!(lamp.diffuse.y.abs() < 1e-5);
    }

    #[test]
    fn sun_toggle_is_one_shot() {
        let mut rig = rig(false, &[]);
        let mut input = InputSnapshot::new();
        let cam = CameraRig::default();

        press(&mut input, Key::B);
        rig.update(0.0, &mut input, &cam);
        assert!(!rig.lights()[0].is_lit());
        rig.update(0.1, &mut input, &cam);
        assert!(!rig.lights()[0].is_lit());

        press(&mut input, Key::B);
        rig.update(0.2, &mut input, &cam);
        assert!(rig.lights()[0].is_lit());
    }

    #[test]
    fn spot_rides_camera_and_toggles_range() {
        let spot = Light {
            kind: LightKind::Spot,
            range: 5.0,
            ..Light::default()
        };
        let mut rig = rig(false, &[spot]);
        let mut input = InputSnapshot::new();
        let cam = CameraRig::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 0.0));

        rig.update(0.0, &mut input, &cam);
        assert_eq!(rig.lights()[1].position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rig.lights()[1].direction, Vec3::NEG_Z);

        press(&mut input, Key::F);
        rig.update(0.0, &mut input, &cam);
        assert_eq!(rig.lights()[1].range, 0.0);

        press(&mut input, Key::F);
        rig.update(0.0, &mut input, &cam);
        assert_eq!(rig.lights()[1].range, 5.0);
    }

    #[test]
    fn markers_only_for_lit_point_lights() {
        let mut rig = rig(true, &[]);
        let mut input = InputSnapshot::new();
        let cam = CameraRig::default();
        rig.update(0.0, &mut input, &cam);

        let mut frame = TextFrame::new();
        frame.clear([0.0; 4]);
        rig.draw(&mut frame, ShaderHandle(1), &cam);
        frame.present();

        let draws = frame.presented();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].label, "light-marker");
        assert_eq!(draws[0].mesh, MeshSource::UvSphere);
        assert_eq!(draws[0].pose.scale, Vec3::splat(0.2));
        assert_eq!(draws[0].pose.position, Vec3::new(3.0, 2.0, 0.0));
    }
}
