use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::control_system::light_phase::PhaseDurations;
use crate::error::{Error, Result};
use crate::global_variables::{
    DEFAULT_CAR_SPEED, DEFAULT_STEP_INTERVAL_MS, ENV_CAR_SPEED, ENV_CATCH_UP, ENV_CONFIG_PATH,
    ENV_STEP_INTERVAL_MS, INITIAL_CAR_POSITIONS, MIN_PHASE_SECS,
};

/// What a light controller does when it is queried after more than one phase has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatchUpPolicy {
    /// Advance at most one phase per query and restart the timer at the query time.
    /// Callers that poll slower than the phase durations see a slowed-down light.
    #[default]
    SingleStep,
    /// Advance through every phase that fully elapsed since the last transition,
    /// keeping the timer aligned to phase boundaries.
    FastForward,
}

impl FromStr for CatchUpPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single_step" | "single-step" => Ok(CatchUpPolicy::SingleStep),
            "fast_forward" | "fast-forward" => Ok(CatchUpPolicy::FastForward),
            other => Err(Error::InvalidConfig(format!(
                "unknown catch-up policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for CatchUpPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatchUpPolicy::SingleStep => f.write_str("single_step"),
            CatchUpPolicy::FastForward => f.write_str("fast_forward"),
        }
    }
}

/// Runtime settings for the light controllers and the car simulation.
/// Missing fields fall back to the constants in `global_variables`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub light_durations: PhaseDurations,
    pub intersection_durations: PhaseDurations,
    pub car_speed: f64,
    pub initial_car_positions: Vec<f64>,
    pub catch_up: CatchUpPolicy,
    pub step_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            light_durations: PhaseDurations::single_light(),
            intersection_durations: PhaseDurations::intersection(),
            car_speed: DEFAULT_CAR_SPEED,
            initial_car_positions: INITIAL_CAR_POSITIONS.to_vec(),
            catch_up: CatchUpPolicy::default(),
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
        }
    }
}

impl SimulationConfig {
    /// Reads a JSON config file. Fields left out of the file keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: SimulationConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the config from the process environment.
    ///
    /// `TRAFFIC_CONFIG` names a JSON file to start from; `TRAFFIC_CAR_SPEED`,
    /// `TRAFFIC_STEP_INTERVAL_MS` and `TRAFFIC_CATCH_UP` override single fields.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG_PATH) {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(raw) = lookup(ENV_CAR_SPEED) {
            config.car_speed = raw.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("{} is not a number: '{}'", ENV_CAR_SPEED, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_STEP_INTERVAL_MS) {
            config.step_interval_ms = raw.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!(
                    "{} is not a whole number: '{}'",
                    ENV_STEP_INTERVAL_MS, raw
                ))
            })?;
        }
        if let Some(raw) = lookup(ENV_CATCH_UP) {
            config.catch_up = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, durations) in [
            ("light_durations", &self.light_durations),
            ("intersection_durations", &self.intersection_durations),
        ] {
            for (phase, secs) in [
                ("red", durations.red),
                ("green", durations.green),
                ("yellow", durations.yellow),
            ] {
                if !secs.is_finite() || secs < MIN_PHASE_SECS {
                    return Err(Error::InvalidConfig(format!(
                        "{}.{} must be at least {} seconds, got {}",
                        name, phase, MIN_PHASE_SECS, secs
                    )));
                }
            }
        }
        if !self.car_speed.is_finite() || self.car_speed < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "car_speed must be non-negative, got {}",
                self.car_speed
            )));
        }
        if self.initial_car_positions.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidConfig(
                "initial_car_positions must be finite numbers".to_string(),
            ));
        }
        Ok(())
    }
}
