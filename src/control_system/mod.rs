// control_system/mod.rs
pub mod intersection_controller;
pub mod light_phase;
mod phase_timer;
pub mod single_light;

pub use intersection_controller::{east_west_for, run_intersection_cycle, Axis, IntersectionController};
pub use light_phase::{LightPhase, PhaseDurations, CYCLE_ORDER};
pub use single_light::SingleLightCycler;
