//! Per-car motion parameters

use serde::{Deserialize, Serialize};

/// Kinematics model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionType {
    /// Constant velocity (GLB)
    #[default]
    Uniform,
    /// Constant acceleration (GLBB)
    Accelerated,
}

impl MotionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionType::Uniform => "uniform",
            MotionType::Accelerated => "accelerated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" | "glb" => Some(MotionType::Uniform),
            "accelerated" | "glbb" => Some(MotionType::Accelerated),
            _ => None,
        }
    }

    /// Whether the acceleration input applies
    pub fn uses_acceleration(&self) -> bool {
        matches!(self, MotionType::Accelerated)
    }
}

/// Motion parameters for one car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    pub motion: MotionType,
    /// Initial velocity v0 (m/s, >= 0)
    pub initial_velocity: f64,
    /// Acceleration a (m/s², >= 0, ignored for uniform motion)
    pub acceleration: f64,
    /// Display name
    pub label: String,
}

impl MotionProfile {
    pub fn uniform(label: impl Into<String>, initial_velocity: f64) -> Self {
        Self {
            motion: MotionType::Uniform,
            initial_velocity,
            acceleration: 0.0,
            label: label.into(),
        }
    }

    pub fn accelerated(label: impl Into<String>, initial_velocity: f64, acceleration: f64) -> Self {
        Self {
            motion: MotionType::Accelerated,
            initial_velocity,
            acceleration,
            label: label.into(),
        }
    }

    /// Merge the fields present in `patch`
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(motion) = patch.motion {
            self.motion = motion;
        }
        if let Some(v0) = patch.initial_velocity {
            self.initial_velocity = v0;
        }
        if let Some(a) = patch.acceleration {
            self.acceleration = a;
        }
        if let Some(label) = &patch.label {
            self.label.clone_from(label);
        }
    }
}

/// Partial profile update from the control surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub motion: Option<MotionType>,
    pub initial_velocity: Option<f64>,
    pub acceleration: Option<f64>,
    pub label: Option<String>,
}
