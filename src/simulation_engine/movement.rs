use crate::control_system::light_phase::LightPhase;
use crate::global_variables::YELLOW_SPEED_FACTOR;

/// Distance a car covers in one step under `phase`.
///
/// GREEN moves at full `speed`, YELLOW at half speed, RED holds the car in place.
pub fn distance_for_phase(phase: LightPhase, speed: f64) -> f64 {
    match phase {
        LightPhase::Green => speed,
        LightPhase::Yellow => speed * YELLOW_SPEED_FACTOR,
        LightPhase::Red => 0.0,
    }
}

/// Advances every car by one step.
///
/// The output has the same length and order as `positions`. Each car moves on its own:
/// there is no collision handling, no spacing between cars and no end of road.
pub fn step_positions(positions: &[f64], phase: LightPhase, speed: f64) -> Vec<f64> {
    let distance = distance_for_phase(phase, speed);
    positions.iter().map(|pos| pos + distance).collect()
}
