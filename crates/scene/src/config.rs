use glam::Vec3;
use serde::{Deserialize, Serialize};
use stagehand_locomotion::LocomotionConfig;
use stagehand_render::{Light, ShaderHandle};
use std::path::Path;

/// Errors from loading a scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Stagehand".into(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub scale: Vec3,
    pub color: [f32; 4],
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            scale: Vec3::new(10.0, 1.0, 10.0),
            color: [0.28, 0.5, 0.2, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    /// Mesh asset path, resolved by the frame target.
    pub asset: String,
    pub scale: f32,
    pub color: [f32; 4],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "spider".into(),
            asset: "res/models/spider/spider.fbx".into(),
            scale: 0.1,
            color: [0.35, 0.3, 0.25, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderSet {
    /// Lit shader for terrain and models.
    pub model: ShaderHandle,
    /// Flat-colour shader for light markers.
    pub marker: ShaderHandle,
}

impl Default for ShaderSet {
    fn default() -> Self {
        Self {
            model: ShaderHandle(0),
            marker: ShaderHandle(1),
        }
    }
}

/// A point light circling the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub radius: f32,
    pub height: f32,
    pub range: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            height: 2.0,
            range: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub lights: Vec<Light>,
    pub orbiting_light: Option<OrbitConfig>,
    /// Range restored when a spot light is switched back on.
    pub spot_range: f32,
    pub marker_scale: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            lights: vec![Light::directional(Vec3::new(-0.2, -1.0, -0.3))],
            orbiting_light: None,
            spot_range: 5.0,
            marker_scale: 0.2,
        }
    }
}

/// Top-level scene configuration, usually read from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub clear_color: [f32; 4],
    /// Stop after this many frames. `None` runs until quit.
    pub frame_limit: Option<u64>,
    pub floor: FloorConfig,
    pub player: PlayerConfig,
    pub shaders: ShaderSet,
    pub locomotion: LocomotionConfig,
    pub lighting: LightingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            frame_limit: None,
            floor: FloorConfig::default(),
            player: PlayerConfig::default(),
            shaders: ShaderSet::default(),
            locomotion: LocomotionConfig::default(),
            lighting: LightingConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would otherwise break scene assembly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locomotion
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("locomotion: {e}")))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
