//! Linear Motion - two cars, two kinematics models, one track view
//!
//! Core modules:
//! - `sim`: Kinematics, per-car motion drivers and the two-car orchestrator
//! - `scheduler`: Frame request/cancel abstraction driven by the host clock
//! - `config`: Startup configuration (profiles, track lengths, track layout)
//! - `headless`: Fixed-clock race runner for the native binary
//! - `ui`: Control-surface input parsing and readout formatting

pub mod config;
pub mod headless;
pub mod scheduler;
pub mod sim;
pub mod ui;

pub use config::{ConfigError, SimConfig};
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler, FrameTicket};

/// Simulation constants
pub mod consts {
    /// Default finish-line distance (meters)
    pub const DEFAULT_TRACK_LENGTH: f64 = 500.0;

    /// Default profile for the first car (uniform motion)
    pub const CAR1_INITIAL_VELOCITY: f64 = 10.0;

    /// Default profile for the second car (accelerated motion)
    pub const CAR2_INITIAL_VELOCITY: f64 = 5.0;
    pub const CAR2_ACCELERATION: f64 = 4.0;

    /// Host timestamps are milliseconds, kinematics run in seconds
    pub const MS_PER_SECOND: f64 = 1000.0;

    /// Synthetic frame interval for the headless runner (60 Hz)
    pub const HEADLESS_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Headless runner gives up after this much simulated time (seconds)
    pub const HEADLESS_TIME_CAP: f64 = 600.0;
}

/// Fraction of the lane a marker sits at, clamped to [0, 1]
///
/// Returns 0 when the track length is not a usable positive number.
#[inline]
pub fn marker_fraction(position: f64, track_length: Option<f64>) -> f64 {
    match track_length {
        Some(len) if len > 0.0 => (position / len).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_fraction() {
        assert_eq!(marker_fraction(250.0, Some(500.0)), 0.5);
        assert_eq!(marker_fraction(900.0, Some(500.0)), 1.0);
        assert_eq!(marker_fraction(0.0, Some(500.0)), 0.0);
        assert_eq!(marker_fraction(10.0, None), 0.0);
        assert_eq!(marker_fraction(10.0, Some(0.0)), 0.0);
    }
}
