use serde::{Deserialize, Serialize};
use std::fmt;

use crate::global_variables::{
    CYCLER_GREEN_SECS, CYCLER_RED_SECS, CYCLER_YELLOW_SECS, INTERSECTION_GREEN_SECS,
    INTERSECTION_RED_SECS, INTERSECTION_YELLOW_SECS,
};

/// The visible state of a traffic signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LightPhase {
    Red,
    Green,
    Yellow,
}

/// Order a single light walks through, wrapping back to the start.
pub const CYCLE_ORDER: [LightPhase; 3] = [LightPhase::Red, LightPhase::Green, LightPhase::Yellow];

impl LightPhase {
    /// The phase following this one in `CYCLE_ORDER`.
    pub fn next(self) -> LightPhase {
        let index = CYCLE_ORDER
            .iter()
            .position(|phase| *phase == self)
            .unwrap_or(0);
        CYCLE_ORDER[(index + 1) % CYCLE_ORDER.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LightPhase::Red => "RED",
            LightPhase::Green => "GREEN",
            LightPhase::Yellow => "YELLOW",
        }
    }
}

impl fmt::Display for LightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long each phase is held, in seconds. Every phase has an entry, so lookups never fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub red: f64,
    pub green: f64,
    pub yellow: f64,
}

impl PhaseDurations {
    /// Durations of the standalone light: RED 5, GREEN 6, YELLOW 2.
    pub const fn single_light() -> Self {
        Self {
            red: CYCLER_RED_SECS,
            green: CYCLER_GREEN_SECS,
            yellow: CYCLER_YELLOW_SECS,
        }
    }

    /// Durations of the intersection's driving axis: GREEN 7, YELLOW 2, RED 7.
    pub const fn intersection() -> Self {
        Self {
            red: INTERSECTION_RED_SECS,
            green: INTERSECTION_GREEN_SECS,
            yellow: INTERSECTION_YELLOW_SECS,
        }
    }

    pub fn get(&self, phase: LightPhase) -> f64 {
        match phase {
            LightPhase::Red => self.red,
            LightPhase::Green => self.green,
            LightPhase::Yellow => self.yellow,
        }
    }

    /// Sum of all three phases.
    pub fn cycle_length(&self) -> f64 {
        self.red + self.green + self.yellow
    }
}
