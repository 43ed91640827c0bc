//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "geode", about = "Subdivided-tetrahedron sphere viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Initial subdivision depth.
    #[arg(long)]
    pub depth: Option<u32>,

    /// Image file to map onto the sphere instead of the checkerboard.
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the mesh at the initial depth to this OBJ file and exit.
    #[arg(long, value_name = "FILE")]
    pub export_obj: Option<PathBuf>,
}

impl Config {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(depth) = args.depth {
            self.render.initial_depth = depth;
        }
        if let Some(ref path) = args.texture {
            self.texture.image_path = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(800),
            depth: Some(2),
            texture: Some(PathBuf::from("moon.jpg")),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.render.initial_depth, 2);
        assert_eq!(config.texture.image_path, Some(PathBuf::from("moon.jpg")));
        assert_eq!(config.window.height, 512);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "geode",
            "--depth",
            "3",
            "--log-level",
            "debug",
            "--export-obj",
            "out.obj",
        ]);
        assert_eq!(args.depth, Some(3));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.export_obj, Some(PathBuf::from("out.obj")));
        assert!(args.config.is_none());
    }
}
