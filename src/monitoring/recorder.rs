use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::control_system::light_phase::LightPhase;
use crate::error::Result;
use crate::global_variables::{INTERSECTION_STATES_CSV, SIMULATION_STEPS_CSV};
use crate::shared_data::{current_timestamp, IntersectionStateResponse, SimulationStepResponse};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStepRecord {
    pub timestamp: u64,
    pub step: usize,
    pub light: LightPhase,
    /// Positions joined with ';' so the row stays flat.
    pub car_positions: String,
}

impl SimulationStepRecord {
    pub fn new(step: usize, response: &SimulationStepResponse) -> Self {
        let car_positions = response
            .car_positions
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(";");
        Self {
            timestamp: current_timestamp(),
            step,
            light: response.light,
            car_positions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionStateRecord {
    pub timestamp: f64,
    pub north_south: LightPhase,
    pub east_west: LightPhase,
}

impl From<&IntersectionStateResponse> for IntersectionStateRecord {
    fn from(state: &IntersectionStateResponse) -> Self {
        Self {
            timestamp: state.timestamp,
            north_south: state.north_south,
            east_west: state.east_west,
        }
    }
}

// Appends one record to a CSV file, writing the header only when the file is new.
pub fn log_to_csv<T: Serialize, P: AsRef<Path>>(path: P, record: &T) -> Result<()> {
    let file_exists = path.as_ref().exists();
    let file = OpenOptions::new().append(true).create(true).open(path.as_ref())?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);
    wtr.serialize(record)?;
    wtr.flush()?;
    Ok(())
}

/// Writes simulation and intersection snapshots to CSV files under one directory.
#[derive(Debug, Clone)]
pub struct SimulationRecorder {
    steps_path: PathBuf,
    intersections_path: PathBuf,
}

impl SimulationRecorder {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            steps_path: dir.as_ref().join(SIMULATION_STEPS_CSV),
            intersections_path: dir.as_ref().join(INTERSECTION_STATES_CSV),
        }
    }

    pub fn record_step(&self, step: usize, response: &SimulationStepResponse) -> Result<()> {
        log_to_csv(&self.steps_path, &SimulationStepRecord::new(step, response))
    }

    pub fn record_intersection(&self, state: &IntersectionStateResponse) -> Result<()> {
        log_to_csv(&self.intersections_path, &IntersectionStateRecord::from(state))
    }

    pub fn read_steps(&self) -> Result<Vec<SimulationStepRecord>> {
        read_csv(&self.steps_path)
    }

    pub fn read_intersections(&self) -> Result<Vec<IntersectionStateRecord>> {
        read_csv(&self.intersections_path)
    }

    pub fn steps_path(&self) -> &Path {
        &self.steps_path
    }

    pub fn intersections_path(&self) -> &Path {
        &self.intersections_path
    }
}

fn read_csv<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    Ok(records)
}
