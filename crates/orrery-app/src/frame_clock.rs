//! Variable-timestep frame clock with a stall clamp.
//!
//! The simulation advances by whatever time the last frame actually took,
//! clamped so that a stall (window drag, debugger pause) never flings the
//! bodies forward by seconds of orbit in a single step.

use std::time::Instant;
use tracing::warn;

/// Default per-frame delta clamp, in milliseconds.
pub const DEFAULT_MAX_DELTA_MS: f32 = 66.0;

/// Measures the wall-clock delta between frames.
///
/// Call [`tick`](Self::tick) once per frame; it returns the clamped delta
/// in milliseconds, ready to feed to the body tree update.
pub struct FrameClock {
    previous: Instant,
    max_delta_ms: f32,
}

impl FrameClock {
    /// Create a clock with the given clamp, starting from now.
    pub fn new(max_delta_ms: f32) -> Self {
        Self {
            previous: Instant::now(),
            max_delta_ms,
        }
    }

    /// Measure the time since the previous tick, in milliseconds, clamped
    /// to the configured maximum.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw_ms = now.duration_since(self.previous).as_secs_f32() * 1000.0;
        self.previous = now;
        clamp_delta(raw_ms, self.max_delta_ms)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA_MS)
    }
}

fn clamp_delta(raw_ms: f32, max_delta_ms: f32) -> f32 {
    if raw_ms > max_delta_ms {
        warn!(
            "Frame delta {:.1}ms exceeds maximum, clamping to {:.1}ms",
            raw_ms, max_delta_ms
        );
        max_delta_ms
    } else {
        raw_ms
    }
}

/// A testable clock that accepts explicit frame times instead of measuring
/// wall-clock time.
#[cfg(test)]
struct TestableFrameClock {
    max_delta_ms: f32,
}

#[cfg(test)]
impl TestableFrameClock {
    fn new(max_delta_ms: f32) -> Self {
        Self { max_delta_ms }
    }

    fn tick(&self, raw_ms: f32) -> f32 {
        clamp_delta(raw_ms, self.max_delta_ms)
    }
}
