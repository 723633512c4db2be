//! Mock traffic monitoring: self-timed traffic lights, a car stepping simulation,
//! and the mock traffic/accident data layer behind the dashboard.

pub mod clock;
pub mod config;
pub mod control_system;
pub mod data;
pub mod error;
pub mod global_variables;
pub mod monitoring;
pub mod shared_data;
pub mod simulation_engine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CatchUpPolicy, SimulationConfig};
pub use control_system::{Axis, IntersectionController, LightPhase, PhaseDurations, SingleLightCycler};
pub use error::{Error, Result};
pub use shared_data::{IntersectionStateResponse, LightStateResponse, SimulationStepResponse};
pub use simulation_engine::{run_simulation_step, step_positions, TrafficSimulation};
