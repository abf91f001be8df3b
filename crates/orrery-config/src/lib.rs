//! Configuration for the orrery viewer.
//!
//! Settings persist to disk as RON, take CLI overrides via clap, and
//! support hot-reload detection.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CameraConfig, Config, DebugConfig, SimConfig, WindowConfig};
pub use error::ConfigError;
