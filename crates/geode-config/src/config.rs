//! Configuration structs with defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Deepest subdivision the viewer accepts.
const DEPTH_LIMIT: u32 = 8;

/// Largest procedural texture side, matching wgpu's default 2D limit.
const CHECKERBOARD_LIMIT: u32 = 8192;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub texture: TextureConfig,
    pub input: InputConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Subdivision depth at startup.
    pub initial_depth: u32,
    /// Upper bound for depth increases, at most 8.
    pub max_depth: u32,
    /// RGBA clear color.
    pub clear_color: [f64; 4],
}

/// Orbit camera and orthographic view volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub radius: f32,
    /// Initial polar angle in degrees.
    pub theta_degrees: f32,
    /// Initial azimuth in degrees.
    pub phi_degrees: f32,
    /// Angle added or removed per key press, in degrees.
    pub step_degrees: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
    pub target: [f32; 3],
    pub up: [f32; 3],
}

/// One light, one material. Colors are RGBA.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Eye-space position; `w = 0` makes the light directional.
    pub light_position: [f32; 4],
    pub light_ambient: [f32; 4],
    pub light_diffuse: [f32; 4],
    pub light_specular: [f32; 4],
    pub material_ambient: [f32; 4],
    pub material_diffuse: [f32; 4],
    pub material_specular: [f32; 4],
    pub shininess: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    /// Image to map onto the sphere. The procedural checkerboard is used when
    /// unset.
    pub image_path: Option<PathBuf>,
    pub checkerboard_size: u32,
    /// Multiplied into the sampled texture color.
    pub tint: [f32; 4],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Keybinding overrides (action name -> key name).
    pub keybindings: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            vsync: true,
            title: "Geode".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            initial_depth: 5,
            max_depth: DEPTH_LIMIT,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: 1.5,
            theta_degrees: 0.0,
            phi_degrees: 0.0,
            step_degrees: 5.0,
            left: -2.0,
            right: 2.0,
            bottom: -2.0,
            top: 2.0,
            near: -10.0,
            far: 10.0,
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_position: [1.0, 1.0, 1.0, 0.0],
            light_ambient: [0.2, 0.2, 0.2, 1.0],
            light_diffuse: [1.0, 1.0, 1.0, 1.0],
            light_specular: [1.0, 1.0, 1.0, 1.0],
            material_ambient: [1.0, 0.0, 1.0, 1.0],
            material_diffuse: [1.0, 0.8, 0.0, 1.0],
            material_specular: [1.0, 0.8, 1.0, 1.0],
            shininess: 100.0,
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            checkerboard_size: 128,
            tint: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// `<platform config dir>/geode`, or `None` when the platform has none.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("geode"))
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Reject values the viewer cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            ));
        }
        if self.render.max_depth > DEPTH_LIMIT {
            return invalid(format!(
                "render.max_depth {} exceeds {DEPTH_LIMIT}",
                self.render.max_depth
            ));
        }
        let size = self.texture.checkerboard_size;
        if size == 0 || size > CHECKERBOARD_LIMIT {
            return invalid(format!(
                "texture.checkerboard_size {size} must be within 1..={CHECKERBOARD_LIMIT}"
            ));
        }
        let c = &self.camera;
        if c.left == c.right || c.bottom == c.top || c.near == c.far {
            return invalid("camera view volume has zero extent".to_string());
        }
        Ok(())
    }
}
