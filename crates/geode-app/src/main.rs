//! The `geode` binary: orbit a textured, Phong-shaded subdivided sphere.

use std::path::PathBuf;

use clap::Parser;
use geode_app::setup::{self, SetupError};
use geode_app::window;
use geode_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info, warn};

/// Loaded, overridden and validated configuration plus the directory it came
/// from.
fn load_config(args: &CliArgs) -> Result<(Config, Option<PathBuf>), SetupError> {
    let config_dir = args.config.clone().or_else(default_config_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok((config, config_dir))
}

fn run(args: &CliArgs, config: Config) -> Result<(), SetupError> {
    if let Some(path) = &args.export_obj {
        setup::export_mesh(&config, path)?;
        return Ok(());
    }
    let texture = setup::load_texture(&config.texture)?;
    window::run(config, texture)
}

fn main() {
    let args = CliArgs::parse();

    let (config, config_dir) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("geode: {e}");
            std::process::exit(1);
        }
    };

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    if let Err(e) = geode_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("geode: logging unavailable: {e}");
    }
    match &config_dir {
        Some(dir) => info!("Using config directory {}", dir.display()),
        None => warn!("No platform config directory, using defaults"),
    }

    if let Err(e) = run(&args, config) {
        error!("{e}");
        eprintln!("geode: {e}");
        std::process::exit(1);
    }
}
