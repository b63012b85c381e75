//! Headless race runner
//!
//! Drives a [`Simulation`] from a synthetic fixed-rate clock instead of the
//! browser's display refresh. Used by the native binary.

use crate::config::SimConfig;
use crate::sim::{DataPoint, EntityId, SimEvent, Simulation};

/// Result of one headless race
#[derive(Debug, Clone, PartialEq)]
pub struct RaceSummary {
    /// Finish time per car, `None` if it never crossed the line
    pub finish_times: [Option<f64>; 2],
    /// Final readout per car
    pub readouts: [DataPoint; 2],
    /// Frames dispatched
    pub frames: u64,
}

impl RaceSummary {
    /// Car that crossed first; ties go to the first car
    pub fn winner(&self) -> Option<EntityId> {
        match self.finish_times {
            [Some(a), Some(b)] => Some(if b < a { EntityId::Second } else { EntityId::First }),
            [Some(_), None] => Some(EntityId::First),
            [None, Some(_)] => Some(EntityId::Second),
            [None, None] => None,
        }
    }
}

/// Run both cars from a standing start until both finish or `time_cap`
/// seconds of host time pass
pub fn run_race(config: &SimConfig, frame_ms: f64, time_cap: f64) -> RaceSummary {
    let mut sim = Simulation::from_config(config);
    let mut finish_times = [None; 2];
    let mut frames = 0u64;
    let mut now = 0.0;

    sim.toggle_running();
    while !sim.all_finished() && now / crate::consts::MS_PER_SECOND <= time_cap {
        sim.pump(now);
        frames += 1;
        for event in sim.drain_events() {
            if let SimEvent::Finished { entity, time } = event {
                log::info!("{} crossed the line at {:.2}s", sim.profile(entity).label, time);
                finish_times[entity.index()] = Some(time);
            }
        }
        now += frame_ms;
    }

    if !sim.all_finished() {
        log::warn!("Stopped after {:.0}s of host time", time_cap);
    }

    RaceSummary {
        finish_times,
        readouts: EntityId::ALL.map(|id| sim.readout(id)),
        frames,
    }
}
