use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

/// Distance falloff terms: `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

#[cfg(test)]
impl Attenuation {
    fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

/// A scene light. Renderables receive the light list as-is and hand it on to
/// the frame target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub kind: LightKind,
    pub enabled: bool,
    pub position: Vec3,
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Reach of point and spot lights. Zero turns them off.
    pub range: f32,
    /// Spot cone, degrees.
    pub inner_cutoff: f32,
    pub outer_cutoff: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightKind::Point,
            enabled: true,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Y,
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            range: 10.0,
            inner_cutoff: 12.5,
            outer_cutoff: 17.5,
        }
    }
}

impl Light {
    pub fn directional(direction: Vec3) -> Self {
        Self {
            kind: LightKind::Directional,
            direction,
            ..Self::default()
        }
    }

    pub fn point(position: Vec3, range: f32) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            range,
            ..Self::default()
        }
    }

    pub fn set_range(&mut self, range: f32) {
        self.range = range.max(0.0);
    }

    /// Whether the light contributes anything this frame.
    pub fn is_lit(&self) -> bool {
        match self.kind {
            LightKind::Directional => self.enabled,
            LightKind::Point | LightKind::Spot => self.enabled && self.range > 0.0,
        }
    }

    /// Falloff tuned so intensity is roughly 1% at `range`.
    pub fn attenuation(&self) -> Attenuation {
        if self.kind == LightKind::Directional || self.range <= 0.0 {
            return Attenuation {
                constant: 1.0,
                linear: 0.0,
                quadratic: 0.0,
            };
        }
        Attenuation {
            constant: 1.0,
            linear: 4.5 / self.range,
            quadratic: 75.0 / (self.range * self.range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directional_light_has_no_falloff() {
        let sun = Light::directional(Vec3::new(-0.2, -1.0, -0.3));
        assert!(sun.is_lit());
        assert_eq!(sun.attenuation().factor(100.0), 1.0);
    }

    #[test]
    fn point_light_fades_with_distance() {
        let lamp = Light::point(Vec3::ZERO, 10.0);
        let a = lamp.attenuation();
        assert_eq!(a.factor(0.0), 1.0);
        assert!(a.factor(5.0) < 1.0);
        assert!(a.factor(10.0) < 0.02);
    }

    #[test]
    fn zero_range_turns_point_light_off() {
        let mut lamp = Light::point(Vec3::ZERO, 10.0);
        lamp.set_range(-3.0);
        assert_eq!(lamp.range, 0.0);
        assert!(!lamp.is_lit());
    }

    #[test]
    fn disabled_directional_is_dark() {
        let mut sun = Light::directional(Vec3::NEG_Y);
        sun.enabled = false;
        assert!(!sun.is_lit());
    }
}
