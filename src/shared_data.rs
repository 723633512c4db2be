// src/shared_data.rs

use crate::control_system::light_phase::LightPhase;
use crate::global_variables::SECONDS_PER_DAY;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Payload for "what colour is the light".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightStateResponse {
    pub phase: LightPhase,
}

/// Both intersection axes plus the wall-clock time of the read (seconds since epoch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionStateResponse {
    pub north_south: LightPhase,
    pub east_west: LightPhase,
    pub timestamp: f64,
}

/// Result of one car simulation step: the phase that was used and where the cars ended up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStepResponse {
    pub light: LightPhase,
    pub car_positions: Vec<f64>,
}

/// One traffic observation for a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficRecord {
    #[serde(default)]
    pub id: u64,
    pub city: String,
    pub traffic_level: String,
    pub accidents: u32,
    pub avg_speed: u32,
    pub accident_type: String,
    pub timestamp: u64,
}

/// One reported accident. `day` counts days since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccidentRecord {
    #[serde(default)]
    pub id: u64,
    pub city: String,
    pub day: u64,
    pub fatal: bool,
    pub accident_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Traffic,
    Accident,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub city: String,
    pub message: String,
    pub timestamp: u64,
}

pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Today's date as days since the Unix epoch (UTC).
pub fn current_day() -> u64 {
    current_timestamp() / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_response_uses_wire_field_names() {
        let response = SimulationStepResponse {
            light: LightPhase::Green,
            car_positions: vec![2.0, 152.0, 302.0],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["light"], "GREEN");
        assert_eq!(value["car_positions"], serde_json::json!([2.0, 152.0, 302.0]));
    }

    #[test]
    fn light_state_serializes_phase() {
        let json = serde_json::to_string(&LightStateResponse {
            phase: LightPhase::Red,
        })
        .unwrap();
        assert_eq!(json, r#"{"phase":"RED"}"#);
    }
}
