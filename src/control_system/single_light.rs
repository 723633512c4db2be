use std::sync::{Mutex, PoisonError};

use crate::clock::{Clock, SystemClock};
use crate::config::{CatchUpPolicy, SimulationConfig};
use crate::control_system::light_phase::{LightPhase, PhaseDurations};
use crate::control_system::phase_timer::PhaseTimer;
use crate::shared_data::LightStateResponse;

/// A single traffic light cycling RED -> GREEN -> YELLOW -> RED on wall-clock time.
///
/// Nothing drives the light in the background: each call to [`get_current_phase`]
/// compares the elapsed time against the current phase's duration and advances
/// if it has run out. With the default [`CatchUpPolicy::SingleStep`] a query moves
/// the light by at most one phase, however long the caller waited.
///
/// [`get_current_phase`]: SingleLightCycler::get_current_phase
pub struct SingleLightCycler<C: Clock = SystemClock> {
    clock: C,
    durations: PhaseDurations,
    policy: CatchUpPolicy,
    timer: Mutex<PhaseTimer>,
}

impl SingleLightCycler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock, PhaseDurations::single_light(), CatchUpPolicy::SingleStep)
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::with_clock(SystemClock, config.light_durations, config.catch_up)
    }
}

impl Default for SingleLightCycler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SingleLightCycler<C> {
    /// Starts at RED with the timer baseline set to the clock's current time.
    pub fn with_clock(clock: C, durations: PhaseDurations, policy: CatchUpPolicy) -> Self {
        let started_at = clock.now();
        Self {
            clock,
            durations,
            policy,
            timer: Mutex::new(PhaseTimer::new(LightPhase::Red, started_at)),
        }
    }

    // Check-and-advance runs under one lock so concurrent callers never double-advance.
    pub fn get_current_phase(&self) -> LightPhase {
        let now = self.clock.now();
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        let before = timer.phase;
        if timer.advance(now, &self.durations, self.policy) > 0 {
            log::info!("Light changed {} -> {}", before, timer.phase);
        }
        timer.phase
    }

    pub fn get_light_state(&self) -> LightStateResponse {
        LightStateResponse {
            phase: self.get_current_phase(),
        }
    }

    /// Reads the phase without advancing it.
    pub fn peek_phase(&self) -> LightPhase {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .phase
    }

    pub fn last_transition_time(&self) -> f64 {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const T0: f64 = 1_700_000_000.0;

    fn cycler(policy: CatchUpPolicy) -> (ManualClock, SingleLightCycler<ManualClock>) {
        let clock = ManualClock::new(T0);
        let cycler =
            SingleLightCycler::with_clock(clock.clone(), PhaseDurations::single_light(), policy);
        (clock, cycler)
    }

    #[test]
    fn starts_red() {
        let (_, cycler) = cycler(CatchUpPolicy::SingleStep);
        assert_eq!(cycler.get_current_phase(), LightPhase::Red);
        assert_eq!(cycler.last_transition_time(), T0);
    }

    #[test]
    fn polling_scenario_advances_one_phase_at_a_time() {
        let (clock, cycler) = cycler(CatchUpPolicy::SingleStep);

        clock.set(T0 + 1.0);
        assert_eq!(cycler.get_current_phase(), LightPhase::Red);

        clock.set(T0 + 5.1);
        assert_eq!(cycler.get_current_phase(), LightPhase::Green);
        assert_eq!(cycler.last_transition_time(), T0 + 5.1);

        clock.set(T0 + 5.1 + 0.1);
        assert_eq!(cycler.get_current_phase(), LightPhase::Green);

        clock.set(T0 + 11.2);
        assert_eq!(cycler.get_current_phase(), LightPhase::Yellow);
    }

    #[test]
    fn phase_is_stable_without_elapsed_time() {
        let (clock, cycler) = cycler(CatchUpPolicy::SingleStep);
        clock.set(T0 + 5.0);
        let first = cycler.get_current_phase();
        let second = cycler.get_current_phase();
        assert_eq!(first, LightPhase::Green);
        assert_eq!(first, second);
    }

    #[test]
    fn short_waits_never_change_phase() {
        let (clock, cycler) = cycler(CatchUpPolicy::SingleStep);
        for _ in 0..40 {
            clock.advance(0.1);
            assert_eq!(cycler.get_current_phase(), LightPhase::Red);
        }
    }

    #[test]
    fn full_cycle_wraps_back_to_red() {
        let (clock, cycler) = cycler(CatchUpPolicy::SingleStep);
        let mut seen = Vec::new();
        for secs in [5.0, 6.0, 2.0] {
            clock.advance(secs);
            seen.push(cycler.get_current_phase());
        }
        assert_eq!(seen, vec![LightPhase::Green, LightPhase::Yellow, LightPhase::Red]);
    }

    #[test]
    fn single_step_catches_up_one_phase_per_query() {
        let (clock, cycler) = cycler(CatchUpPolicy::SingleStep);
        clock.advance(60.0);
        assert_eq!(cycler.get_current_phase(), LightPhase::Green);
        assert_eq!(cycler.get_current_phase(), LightPhase::Green);
        assert_eq!(cycler.last_transition_time(), T0 + 60.0);
    }

    #[test]
    fn fast_forward_replays_missed_phases() {
        let (clock, cycler) = cycler(CatchUpPolicy::FastForward);
        // RED 0..5, GREEN 5..11, YELLOW 11..13
        clock.advance(12.0);
        assert_eq!(cycler.get_current_phase(), LightPhase::Yellow);
        assert_eq!(cycler.last_transition_time(), T0 + 11.0);
    }

    #[test]
    fn fast_forward_returns_with_durations_below_timestamp_precision() {
        let clock = ManualClock::new(T0);
        let tiny = PhaseDurations {
            red: 1e-7,
            green: 1e-7,
            yellow: 1e-7,
        };
        let cycler = SingleLightCycler::with_clock(clock.clone(), tiny, CatchUpPolicy::FastForward);
        clock.advance(1.000000411);
        cycler.get_current_phase();
        assert!(cycler.last_transition_time() <= clock.now());

        // The lock was released, so later queries still go through.
        clock.advance(0.5);
        cycler.get_current_phase();
        assert!(cycler.last_transition_time() > T0 + 1.0);
    }

    #[test]
    fn peek_does_not_advance() {
        let (clock, cycler) = cycler(CatchUpPolicy::SingleStep);
        clock.advance(10.0);
        assert_eq!(cycler.peek_phase(), LightPhase::Red);
        assert_eq!(cycler.get_light_state().phase, LightPhase::Green);
    }
}
