// monitoring/mod.rs
pub mod recorder;
pub mod report;

pub use recorder::{log_to_csv, IntersectionStateRecord, SimulationRecorder, SimulationStepRecord};
pub use report::render_accident_trend;
