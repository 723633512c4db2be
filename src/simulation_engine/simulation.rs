// simulation.rs
use std::sync::Arc;
use tokio::time::{sleep, Duration};

use crate::clock::Clock;
use crate::config::SimulationConfig;
use crate::control_system::intersection_controller::{Axis, IntersectionController};
use crate::control_system::light_phase::LightPhase;
use crate::control_system::single_light::SingleLightCycler;
use crate::global_variables::{DEFAULT_CAR_SPEED, INITIAL_CAR_POSITIONS};
use crate::shared_data::SimulationStepResponse;
use crate::simulation_engine::movement::step_positions;

/// Anything that can say which phase governs the cars right now.
pub trait PhaseSource: Send + Sync {
    fn current_phase(&self) -> LightPhase;
}

impl<C: Clock> PhaseSource for SingleLightCycler<C> {
    fn current_phase(&self) -> LightPhase {
        self.get_current_phase()
    }
}

impl<T: PhaseSource + ?Sized> PhaseSource for Arc<T> {
    fn current_phase(&self) -> LightPhase {
        (**self).current_phase()
    }
}

/// One direction of an intersection used as a light for the car simulation.
pub struct AxisSignal<C: Clock> {
    pub controller: Arc<IntersectionController<C>>,
    pub axis: Axis,
}

impl<C: Clock> PhaseSource for AxisSignal<C> {
    fn current_phase(&self) -> LightPhase {
        self.controller.light_color(self.axis)
    }
}

/// Reads the phase once, moves the cars under it and reports that same phase.
pub fn run_simulation_step<S: PhaseSource + ?Sized>(
    source: &S,
    car_positions: &[f64],
    speed: f64,
) -> SimulationStepResponse {
    let light = source.current_phase();
    SimulationStepResponse {
        light,
        car_positions: step_positions(car_positions, light, speed),
    }
}

/// Car positions carried from one step to the next, together with the light that moves them.
pub struct TrafficSimulation<S: PhaseSource> {
    source: S,
    speed: f64,
    car_positions: Vec<f64>,
}

impl<S: PhaseSource> TrafficSimulation<S> {
    /// Cars at 0, 150 and 300, moving at the default speed.
    pub fn new(source: S) -> Self {
        Self::with_positions(source, INITIAL_CAR_POSITIONS.to_vec(), DEFAULT_CAR_SPEED)
    }

    pub fn from_config(source: S, config: &SimulationConfig) -> Self {
        Self::with_positions(source, config.initial_car_positions.clone(), config.car_speed)
    }

    pub fn with_positions(source: S, car_positions: Vec<f64>, speed: f64) -> Self {
        Self {
            source,
            speed,
            car_positions,
        }
    }

    /// Runs one step and keeps the new positions for the next call.
    pub fn step(&mut self) -> SimulationStepResponse {
        let response = run_simulation_step(&self.source, &self.car_positions, self.speed);
        self.car_positions.clone_from(&response.car_positions);
        log::debug!(
            "Light: {}, Cars: {:?}",
            response.light,
            response.car_positions
        );
        response
    }

    pub fn car_positions(&self) -> &[f64] {
        &self.car_positions
    }
}

/// Runs `steps` simulation steps `interval` apart, handing each result to `on_step`.
pub async fn run_simulation<S, F>(
    simulation: &mut TrafficSimulation<S>,
    steps: usize,
    interval: Duration,
    mut on_step: F,
) -> Vec<SimulationStepResponse>
where
    S: PhaseSource,
    F: FnMut(usize, &SimulationStepResponse),
{
    log::info!("Starting traffic simulation for {} steps", steps);
    let mut history = Vec::with_capacity(steps);
    for step in 0..steps {
        let response = simulation.step();
        on_step(step, &response);
        history.push(response);
        if step + 1 < steps {
            sleep(interval).await;
        }
    }
    history
}
