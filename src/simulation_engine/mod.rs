// simulation_engine/mod.rs
pub mod movement;
pub mod simulation;

pub use movement::{distance_for_phase, step_positions};
pub use simulation::{run_simulation, run_simulation_step, AxisSignal, PhaseSource, TrafficSimulation};
