//! Track length and how the two lanes share it

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Finish-line distance for one lane
///
/// `Unset` is what an empty input box produces. It is kept as-is instead of
/// falling back to a default; while unset a car can never finish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrackLength {
    Meters(f64),
    Unset,
}

impl TrackLength {
    pub fn meters(&self) -> Option<f64> {
        match *self {
            TrackLength::Meters(m) => Some(m),
            TrackLength::Unset => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, TrackLength::Meters(_))
    }

    /// Finish condition: reached or passed the line
    pub fn is_reached(&self, position: f64) -> bool {
        match *self {
            TrackLength::Meters(m) => position >= m,
            TrackLength::Unset => false,
        }
    }
}

impl Default for TrackLength {
    fn default() -> Self {
        TrackLength::Meters(crate::consts::DEFAULT_TRACK_LENGTH)
    }
}

/// Whether both lanes use one track length or each has its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrackLayout {
    Shared,
    #[default]
    PerEntity,
}

/// Which lane(s) a track-length edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackTarget {
    Both,
    Entity(EntityId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_reached() {
        let track = TrackLength::Meters(500.0);
        assert!(!track.is_reached(499.9));
        assert!(track.is_reached(500.0));
        assert!(track.is_reached(612.0));
        assert!(!TrackLength::Unset.is_reached(1e12));
    }

    #[test]
    fn test_zero_length_is_reached_immediately() {
        assert!(TrackLength::Meters(0.0).is_reached(0.0));
    }
}
