//! Readout and track formatting

use crate::sim::DataPoint;

/// Display strings for one car's live readout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub time: String,
    pub distance: String,
    pub velocity: String,
}

impl Readout {
    pub fn from_point(point: &DataPoint) -> Self {
        Self {
            time: format!("{:.2} s", point.time),
            distance: format!("{:.2} m", point.position),
            velocity: format!("{:.2} m/s", point.velocity),
        }
    }
}

/// Start/Pause button label
pub fn toggle_label(running: bool) -> &'static str {
    if running { "Pause" } else { "Start" }
}

/// Start/Pause button icon
pub fn toggle_icon(running: bool) -> &'static str {
    if running { "⏸" } else { "▶" }
}

/// CSS `left` value for a marker at `fraction` (0..=1) of the lane
pub fn marker_style(fraction: f64) -> String {
    format!("{:.3}%", fraction.clamp(0.0, 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_two_decimals() {
        let readout = Readout::from_point(&DataPoint {
            time: 14.6107,
            position: 500.0,
            velocity: 63.4429,
        });
        assert_eq!(readout.time, "14.61 s");
        assert_eq!(readout.distance, "500.00 m");
        assert_eq!(readout.velocity, "63.44 m/s");
        assert_eq!(Readout::from_point(&DataPoint::ZERO).velocity, "0.00 m/s");
    }

    #[test]
    fn test_toggle_label() {
        assert_eq!(toggle_label(true), "Pause");
        assert_eq!(toggle_label(false), "Start");
        assert_eq!(toggle_icon(true), "⏸");
        assert_eq!(toggle_icon(false), "▶");
    }

    #[test]
    fn test_marker_style() {
        assert_eq!(marker_style(0.5), "50.000%");
        assert_eq!(marker_style(2.0), "100.000%");
        assert_eq!(marker_style(0.0), "0.000%");
    }
}
