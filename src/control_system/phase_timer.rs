use crate::config::CatchUpPolicy;
use crate::control_system::light_phase::{LightPhase, PhaseDurations, CYCLE_ORDER};

/// The phase a controller is in and when it entered it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PhaseTimer {
    pub phase: LightPhase,
    pub last_transition: f64,
}

impl PhaseTimer {
    pub fn new(phase: LightPhase, started_at: f64) -> Self {
        Self {
            phase,
            last_transition: started_at,
        }
    }

    /// Moves the phase forward according to `policy` and returns how many transitions happened.
    pub fn advance(&mut self, now: f64, durations: &PhaseDurations, policy: CatchUpPolicy) -> usize {
        match policy {
            CatchUpPolicy::SingleStep => {
                if now - self.last_transition >= durations.get(self.phase) {
                    self.phase = self.phase.next();
                    self.last_transition = now;
                    1
                } else {
                    0
                }
            }
            CatchUpPolicy::FastForward => self.fast_forward(now, durations),
        }
    }

    fn fast_forward(&mut self, now: f64, durations: &PhaseDurations) -> usize {
        let elapsed = now - self.last_transition;
        // Also false for NaN durations or timestamps.
        if !(elapsed >= durations.get(self.phase)) {
            return 0;
        }
        let mut transitions = 0usize;

        // Whole cycles leave the phase where it is.
        let cycle = durations.cycle_length();
        if cycle.is_finite() && cycle > 0.0 {
            let whole_cycles = (elapsed / cycle).floor();
            if whole_cycles >= 1.0 {
                self.last_transition += whole_cycles * cycle;
                transitions = (whole_cycles as usize).saturating_mul(CYCLE_ORDER.len());
            }
        }

        // Less than one cycle is left, so at most one lap of phases remains.
        for _ in 0..CYCLE_ORDER.len() {
            let duration = durations.get(self.phase);
            if !(now - self.last_transition >= duration) {
                break;
            }
            let next_start = self.last_transition + duration;
            self.phase = self.phase.next();
            transitions = transitions.saturating_add(1);
            if next_start <= self.last_transition {
                // Zero duration, or too small to move a timestamp this large.
                self.last_transition = now;
                break;
            }
            self.last_transition = next_start;
        }
        transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_step_moves_one_phase_no_matter_how_late() {
        let durations = PhaseDurations::single_light();
        let mut timer = PhaseTimer::new(LightPhase::Red, 0.0);
        assert_eq!(timer.advance(100.0, &durations, CatchUpPolicy::SingleStep), 1);
        assert_eq!(timer.phase, LightPhase::Green);
        assert_eq!(timer.last_transition, 100.0);
    }

    #[test]
    fn fast_forward_lands_on_phase_boundary() {
        let durations = PhaseDurations::single_light();
        let mut timer = PhaseTimer::new(LightPhase::Red, 0.0);
        // RED 0..5, GREEN 5..11, YELLOW 11..13, RED 13..18
        assert_eq!(timer.advance(12.0, &durations, CatchUpPolicy::FastForward), 2);
        assert_eq!(timer.phase, LightPhase::Yellow);
        assert_eq!(timer.last_transition, 11.0);
    }

    #[test]
    fn fast_forward_skips_whole_cycles() {
        let durations = PhaseDurations::single_light();
        let mut timer = PhaseTimer::new(LightPhase::Red, 0.0);
        // 13 * 10 = 130 is the start of a RED phase; 136 is inside GREEN (135..141).
        assert_eq!(timer.advance(136.0, &durations, CatchUpPolicy::FastForward), 31);
        assert_eq!(timer.phase, LightPhase::Green);
        assert_eq!(timer.last_transition, 135.0);
    }

    #[test]
    fn nothing_happens_before_duration_elapses() {
        let durations = PhaseDurations::single_light();
        for policy in [CatchUpPolicy::SingleStep, CatchUpPolicy::FastForward] {
            let mut timer = PhaseTimer::new(LightPhase::Red, 10.0);
            assert_eq!(timer.advance(14.9, &durations, policy), 0);
            assert_eq!(timer, PhaseTimer::new(LightPhase::Red, 10.0));
        }
    }

    #[test]
    fn fast_forward_terminates_with_tiny_durations_at_epoch_scale() {
        let durations = PhaseDurations {
            red: 1e-7,
            green: 1e-7,
            yellow: 1e-7,
        };
        let start = 1_700_000_000.0;
        let mut timer = PhaseTimer::new(LightPhase::Red, start);
        let now = start + 1.000000411;
        assert!(timer.advance(now, &durations, CatchUpPolicy::FastForward) > 0);
        assert!(timer.last_transition <= now);
        assert!(timer.last_transition > start);
    }

    #[test]
    fn nan_durations_never_advance() {
        let durations = PhaseDurations {
            red: f64::NAN,
            green: 6.0,
            yellow: 2.0,
        };
        for policy in [CatchUpPolicy::SingleStep, CatchUpPolicy::FastForward] {
            let mut timer = PhaseTimer::new(LightPhase::Red, 0.0);
            assert_eq!(timer.advance(1_000.0, &durations, policy), 0);
            assert_eq!(timer.phase, LightPhase::Red);
        }
    }
}
