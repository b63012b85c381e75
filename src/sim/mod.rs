//! Motion simulation module
//!
//! Everything that decides where a car is lives here. This module must stay
//! free of DOM and platform code:
//! - Closed-form kinematics only
//! - Time comes in as host timestamps, never read from a clock
//! - Frames are requested through [`crate::scheduler::FrameScheduler`]

pub mod driver;
pub mod kinematics;
pub mod orchestrator;
pub mod profile;
pub mod track;

pub use driver::{DriverPhase, FrameReport, MotionDriver, RunState};
pub use kinematics::evaluate;
pub use orchestrator::{EntitySnapshot, SimEvent, SimSnapshot, Simulation};
pub use profile::{MotionProfile, MotionType, ProfilePatch};
pub use track::{TrackLayout, TrackLength, TrackTarget};

use serde::{Deserialize, Serialize};

/// Which of the two cars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    First,
    Second,
}

impl EntityId {
    pub const ALL: [EntityId; 2] = [EntityId::First, EntityId::Second];

    pub fn index(self) -> usize {
        match self {
            EntityId::First => 0,
            EntityId::Second => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityId::First => "car1",
            EntityId::Second => "car2",
        }
    }
}

/// One frame's output for a car
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    /// Elapsed time (s)
    pub time: f64,
    /// Distance traveled (m)
    pub position: f64,
    /// Instantaneous velocity (m/s)
    pub velocity: f64,
}

impl DataPoint {
    pub const ZERO: DataPoint = DataPoint {
        time: 0.0,
        position: 0.0,
        velocity: 0.0,
    };
}
