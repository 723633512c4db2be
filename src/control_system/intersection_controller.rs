use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::time::{sleep, Duration};

use crate::clock::{Clock, SystemClock};
use crate::config::{CatchUpPolicy, SimulationConfig};
use crate::control_system::light_phase::{LightPhase, PhaseDurations};
use crate::control_system::phase_timer::PhaseTimer;
use crate::shared_data::IntersectionStateResponse;

/// One of the two perpendicular directions through the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    NorthSouth,
    EastWest,
}

/// East-west phase that goes with a north-south phase.
///
/// | north-south | east-west |
/// |-------------|-----------|
/// | GREEN       | RED       |
/// | YELLOW      | RED       |
/// | RED         | GREEN     |
///
/// East-west has no yellow of its own: it drops straight from GREEN to RED
/// when north-south turns GREEN.
pub fn east_west_for(north_south: LightPhase) -> LightPhase {
    match north_south {
        LightPhase::Green | LightPhase::Yellow => LightPhase::Red,
        LightPhase::Red => LightPhase::Green,
    }
}

#[derive(Debug, Clone, Copy)]
struct IntersectionLights {
    north_south: PhaseTimer,
    east_west: LightPhase,
}

/// Two coupled lights at a four-way intersection.
///
/// North-south is the driving axis and the only one with a timer; east-west is
/// derived from it through [`east_west_for`], so both axes are never GREEN at once.
/// Like [`SingleLightCycler`](crate::control_system::single_light::SingleLightCycler),
/// the lights only move when queried.
pub struct IntersectionController<C: Clock = SystemClock> {
    clock: C,
    durations: PhaseDurations,
    policy: CatchUpPolicy,
    lights: Mutex<IntersectionLights>,
}

impl IntersectionController<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock, PhaseDurations::intersection(), CatchUpPolicy::SingleStep)
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::with_clock(SystemClock, config.intersection_durations, config.catch_up)
    }
}

impl Default for IntersectionController<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> IntersectionController<C> {
    /// Starts with north-south GREEN and east-west RED.
    pub fn with_clock(clock: C, durations: PhaseDurations, policy: CatchUpPolicy) -> Self {
        let started_at = clock.now();
        Self {
            clock,
            durations,
            policy,
            lights: Mutex::new(IntersectionLights {
                north_south: PhaseTimer::new(LightPhase::Green, started_at),
                east_west: LightPhase::Red,
            }),
        }
    }

    // Advances both axes if north-south's phase has run out, then returns a snapshot.
    fn update_lights(&self) -> (LightPhase, LightPhase, f64) {
        let now = self.clock.now();
        let mut lights = self.lights.lock().unwrap_or_else(PoisonError::into_inner);
        if lights.north_south.advance(now, &self.durations, self.policy) > 0 {
            lights.east_west = east_west_for(lights.north_south.phase);
            log::info!(
                "Lights updated: NS={}, EW={}",
                lights.north_south.phase,
                lights.east_west
            );
        }
        (lights.north_south.phase, lights.east_west, now)
    }

    pub fn get_intersection_state(&self) -> IntersectionStateResponse {
        let (north_south, east_west, timestamp) = self.update_lights();
        IntersectionStateResponse {
            north_south,
            east_west,
            timestamp,
        }
    }

    /// Current phase for one direction, advancing the lights first.
    pub fn light_color(&self, axis: Axis) -> LightPhase {
        let (north_south, east_west, _) = self.update_lights();
        match axis {
            Axis::NorthSouth => north_south,
            Axis::EastWest => east_west,
        }
    }

    pub fn last_transition_time(&self) -> f64 {
        self.lights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .north_south
            .last_transition
    }
}

/// Polls the intersection `cycles` times, `interval` apart, handing each state to `on_state`.
pub async fn run_intersection_cycle<C, F>(
    controller: Arc<IntersectionController<C>>,
    cycles: usize,
    interval: Duration,
    mut on_state: F,
) -> Vec<IntersectionStateResponse>
where
    C: Clock,
    F: FnMut(usize, &IntersectionStateResponse),
{
    log::info!("Starting intersection traffic light simulation");
    let mut states = Vec::with_capacity(cycles);
    for cycle in 0..cycles {
        let state = controller.get_intersection_state();
        log::debug!("NS={} | EW={}", state.north_south, state.east_west);
        on_state(cycle, &state);
        states.push(state);
        if cycle + 1 < cycles {
            sleep(interval).await;
        }
    }
    states
}
