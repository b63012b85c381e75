//! Per-car motion driver
//!
//! Owns one car's elapsed-time accumulator and advances it from host frame
//! timestamps while running. State machine:
//!
//! `Idle -> Running -> (Paused <-> Running) -> Finished`, and `reinitialize`
//! takes any state back to `Idle`.

use serde::{Deserialize, Serialize};

use super::kinematics::evaluate;
use super::profile::MotionProfile;
use super::track::TrackLength;
use super::{DataPoint, EntityId};
use crate::consts::MS_PER_SECOND;
use crate::scheduler::{FrameHandle, FrameScheduler};

/// Lifecycle of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverPhase {
    /// Fresh, never started since construction or reset
    Idle,
    /// Requesting frames and accumulating time
    Running,
    /// Stopped mid-run, state preserved
    Paused,
    /// Crossed the finish line, frozen until reset
    Finished,
}

/// Mutable per-car run state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunState {
    /// Accumulated running time (s)
    pub elapsed_time: f64,
    /// Distance traveled (m)
    pub position: f64,
    pub finished: bool,
}

/// What one computed frame produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub point: DataPoint,
    /// True only on the frame that crossed the line
    pub finished_now: bool,
}

#[derive(Debug)]
pub struct MotionDriver {
    id: EntityId,
    phase: DriverPhase,
    run: RunState,
    /// Timestamp (ms) of the previous computed frame; `None` right after a (re)start
    last_timestamp: Option<f64>,
    /// Outstanding frame request, if any
    pending: Option<FrameHandle>,
}

impl MotionDriver {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            phase: DriverPhase::Idle,
            run: RunState::default(),
            last_timestamp: None,
            pending: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn is_finished(&self) -> bool {
        self.run.finished
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Begin or resume requesting frames. No-op when running or finished.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.phase {
            DriverPhase::Idle | DriverPhase::Paused => {
                // Resync the delta baseline so a pause gap is not counted
                self.last_timestamp = None;
                self.pending = Some(scheduler.request_next_tick(self.id));
                self.phase = DriverPhase::Running;
                log::debug!("{} running from t={:.3}s", self.id.as_str(), self.run.elapsed_time);
                true
            }
            DriverPhase::Running | DriverPhase::Finished => false,
        }
    }

    /// Stop requesting frames, keeping elapsed time and position
    pub fn pause<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if self.phase != DriverPhase::Running {
            return false;
        }
        self.cancel_pending(scheduler);
        self.last_timestamp = None;
        self.phase = DriverPhase::Paused;
        log::debug!("{} paused at t={:.3}s", self.id.as_str(), self.run.elapsed_time);
        true
    }

    /// Back to `Idle` with zeroed state, whatever the current phase
    pub fn reinitialize<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.cancel_pending(scheduler);
        self.run = RunState::default();
        self.last_timestamp = None;
        self.phase = DriverPhase::Idle;
    }

    /// Handle a frame callback at host time `now_ms`
    ///
    /// Returns `None` for stale callbacks (cancelled or superseded handles)
    /// and for the baseline frame right after a (re)start.
    pub fn on_frame<S: FrameScheduler + ?Sized>(
        &mut self,
        handle: FrameHandle,
        now_ms: f64,
        profile: &MotionProfile,
        track: TrackLength,
        scheduler: &mut S,
    ) -> Option<FrameReport> {
        if self.phase != DriverPhase::Running || self.pending != Some(handle) {
            log::debug!("{} ignoring stale frame {:?}", self.id.as_str(), handle);
            return None;
        }
        self.pending = None;

        let Some(last) = self.last_timestamp else {
            self.last_timestamp = Some(now_ms);
            self.pending = Some(scheduler.request_next_tick(self.id));
            return None;
        };

        // Non-monotonic host clocks count as no time passing
        let delta = ((now_ms - last) / MS_PER_SECOND).max(0.0);
        let time = self.run.elapsed_time + delta;

        let (mut position, mut velocity) =
            evaluate(time, profile.initial_velocity, profile.acceleration, profile.motion);

        let finished_now = track.is_reached(position);
        if finished_now {
            if let Some(len) = track.meters() {
                position = len;
            }
            velocity = 0.0;
            self.run.finished = true;
            self.last_timestamp = None;
            self.phase = DriverPhase::Finished;
            log::info!("{} finished at t={:.2}s", profile.label, time);
        } else {
            self.last_timestamp = Some(now_ms);
            self.pending = Some(scheduler.request_next_tick(self.id));
        }

        self.run.elapsed_time = time;
        self.run.position = position;

        Some(FrameReport {
            point: DataPoint {
                time,
                position,
                velocity,
            },
            finished_now,
        })
    }

    fn cancel_pending<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }
}
