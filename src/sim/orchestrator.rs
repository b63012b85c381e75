//! Two-car simulation orchestrator
//!
//! Owns both profiles, both drivers, the track lengths and the global
//! running flag. Display code reads [`Simulation::snapshot`] and reacts to
//! [`Simulation::drain_events`]; it never touches the drivers directly.

use serde::{Deserialize, Serialize};

use super::driver::{DriverPhase, MotionDriver};
use super::profile::{MotionProfile, ProfilePatch};
use super::track::{TrackLayout, TrackLength, TrackTarget};
use super::{DataPoint, EntityId};
use crate::config::SimConfig;
use crate::marker_fraction;
use crate::scheduler::{FrameQueue, FrameScheduler, FrameTicket};

/// Lifecycle transitions, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Started,
    Paused,
    Finished { entity: EntityId, time: f64 },
    Reset { epoch: u32 },
}

/// Display view of one car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub profile: MotionProfile,
    pub track: TrackLength,
    pub readout: DataPoint,
    pub phase: DriverPhase,
    pub finished: bool,
    /// Marker offset along the lane, 0..=1
    pub marker: f64,
}

/// Display view of the whole simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub running: bool,
    pub epoch: u32,
    /// Whether the Start/Pause toggle is enabled
    pub can_toggle: bool,
    pub entities: [EntitySnapshot; 2],
}

pub struct Simulation<S: FrameScheduler = FrameQueue> {
    scheduler: S,
    layout: TrackLayout,
    profiles: [MotionProfile; 2],
    tracks: [TrackLength; 2],
    drivers: [MotionDriver; 2],
    readouts: [DataPoint; 2],
    finished: [bool; 2],
    running: bool,
    epoch: u32,
    events: Vec<SimEvent>,
}

impl Simulation<FrameQueue> {
    pub fn from_config(config: &SimConfig) -> Self {
        Self::with_scheduler(config, FrameQueue::new())
    }

    /// Dispatch every frame request that is due at host time `now_ms`
    pub fn pump(&mut self, now_ms: f64) {
        for ticket in self.scheduler.take_due() {
            self.dispatch(ticket, now_ms);
        }
    }
}

impl<S: FrameScheduler> Simulation<S> {
    pub fn with_scheduler(config: &SimConfig, scheduler: S) -> Self {
        let track = config.initial_track();
        Self {
            scheduler,
            layout: config.track_layout,
            profiles: [config.car1.to_profile(), config.car2.to_profile()],
            tracks: [track, track],
            drivers: [
                MotionDriver::new(EntityId::First),
                MotionDriver::new(EntityId::Second),
            ],
            readouts: [DataPoint::ZERO; 2],
            finished: [false; 2],
            running: false,
            epoch: 0,
            events: Vec::new(),
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn layout(&self) -> TrackLayout {
        self.layout
    }

    pub fn profile(&self, entity: EntityId) -> &MotionProfile {
        &self.profiles[entity.index()]
    }

    pub fn track(&self, entity: EntityId) -> TrackLength {
        self.tracks[entity.index()]
    }

    pub fn readout(&self, entity: EntityId) -> DataPoint {
        self.readouts[entity.index()]
    }

    pub fn driver(&self, entity: EntityId) -> &MotionDriver {
        &self.drivers[entity.index()]
    }

    pub fn has_finished(&self, entity: EntityId) -> bool {
        self.finished[entity.index()]
    }

    pub fn all_finished(&self) -> bool {
        self.finished.iter().all(|f| *f)
    }

    /// Start/Pause is disabled once both cars are across the line
    pub fn can_toggle(&self) -> bool {
        !self.all_finished()
    }

    /// Flip between running and paused. Returns false when disabled.
    pub fn toggle_running(&mut self) -> bool {
        if !self.can_toggle() {
            log::debug!("Toggle ignored, both cars finished");
            return false;
        }

        self.running = !self.running;
        for driver in &mut self.drivers {
            if self.running {
                driver.start(&mut self.scheduler);
            } else {
                driver.pause(&mut self.scheduler);
            }
        }

        if self.running {
            log::info!("Simulation started");
            self.events.push(SimEvent::Started);
        } else {
            log::info!("Simulation paused");
            self.events.push(SimEvent::Paused);
        }
        true
    }

    /// Stop, bump the epoch and zero both cars
    pub fn reset(&mut self) {
        self.running = false;
        self.epoch = self.epoch.wrapping_add(1);
        for driver in &mut self.drivers {
            driver.reinitialize(&mut self.scheduler);
        }
        self.finished = [false; 2];
        self.readouts = [DataPoint::ZERO; 2];
        log::info!("Simulation reset (epoch {})", self.epoch);
        self.events.push(SimEvent::Reset { epoch: self.epoch });
    }

    /// Merge a partial profile edit into one car
    ///
    /// Editing while running is blocked by the control surface, not here.
    pub fn update_profile(&mut self, entity: EntityId, patch: &ProfilePatch) {
        for value in [patch.initial_velocity, patch.acceleration].into_iter().flatten() {
            if value.is_nan() || value < 0.0 {
                log::warn!("Rejected profile value {} for {}", value, entity.as_str());
                return;
            }
        }
        if self.running {
            log::debug!("Profile for {} edited while running", entity.as_str());
        }
        self.profiles[entity.index()].apply(patch);
    }

    /// Set a finish-line distance
    ///
    /// With [`TrackLayout::Shared`] every edit applies to both lanes.
    pub fn set_track_length(&mut self, target: TrackTarget, value: TrackLength) {
        if let TrackLength::Meters(m) = value {
            if m.is_nan() || m < 0.0 {
                log::warn!("Rejected track length {}", m);
                return;
            }
        }

        match (self.layout, target) {
            (TrackLayout::Shared, _) | (TrackLayout::PerEntity, TrackTarget::Both) => {
                self.tracks = [value; 2];
            }
            (TrackLayout::PerEntity, TrackTarget::Entity(entity)) => {
                self.tracks[entity.index()] = value;
            }
        }
    }

    /// Route one due frame request to the driver that asked for it
    pub fn dispatch(&mut self, ticket: FrameTicket, now_ms: f64) {
        let i = ticket.owner.index();
        let report = self.drivers[i].on_frame(
            ticket.handle,
            now_ms,
            &self.profiles[i],
            self.tracks[i],
            &mut self.scheduler,
        );
        let Some(report) = report else {
            return;
        };

        self.readouts[i] = report.point;
        if report.finished_now && !self.finished[i] {
            self.finished[i] = true;
            self.events.push(SimEvent::Finished {
                entity: ticket.owner,
                time: report.point.time,
            });

            // Running stays set until reset so the controls remain locked
            if self.all_finished() {
                log::info!("Both cars finished");
            }
        }
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            running: self.running,
            epoch: self.epoch,
            can_toggle: self.can_toggle(),
            entities: EntityId::ALL.map(|id| self.entity_snapshot(id)),
        }
    }

    fn entity_snapshot(&self, id: EntityId) -> EntitySnapshot {
        let i = id.index();
        let readout = self.readouts[i];
        EntitySnapshot {
            id,
            profile: self.profiles[i].clone(),
            track: self.tracks[i],
            readout,
            phase: self.drivers[i].phase(),
            finished: self.finished[i],
            marker: marker_fraction(readout.position, self.tracks[i].meters()),
        }
    }
}
