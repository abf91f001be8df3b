//! Application shell for the orrery viewer.
//!
//! Owns the window, event loop and frame timing, and wires the scene,
//! input, panel and renderer crates together into one synchronous frame.

pub mod frame_clock;
pub mod window;

pub use frame_clock::FrameClock;
pub use window::{AppState, run_with_config};
