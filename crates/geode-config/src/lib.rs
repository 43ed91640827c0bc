//! Configuration for the geode viewer.
//!
//! Settings persist to `config.ron` and every section falls back to defaults
//! when missing. Command-line flags override the loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, InputConfig, LightingConfig, RenderConfig, TextureConfig,
    WindowConfig, default_config_dir,
};
pub use error::ConfigError;
