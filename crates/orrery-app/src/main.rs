//! The binary entry point for the orrery viewer.

use clap::Parser;
use tracing::error;

use orrery_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .expect("Failed to resolve config directory")
            .join("orrery")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let system = orrery_scene::sample_system();

    if let Err(e) = orrery_app::run_with_config(config, system) {
        error!("Event loop error: {e}");
        std::process::exit(1);
    }
}
