// simulation_main.rs
use std::process::ExitCode;
use tokio::time::Duration;
use traffic_monitor::monitoring::SimulationRecorder;
use traffic_monitor::simulation_engine::{run_simulation, TrafficSimulation};
use traffic_monitor::{SimulationConfig, SingleLightCycler};

const STEPS: usize = 20;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let config = match SimulationConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Starting traffic simulation...");
    let cycler = SingleLightCycler::from_config(&config);
    let mut simulation = TrafficSimulation::from_config(cycler, &config);
    let recorder = SimulationRecorder::new(".");

    run_simulation(
        &mut simulation,
        STEPS,
        Duration::from_millis(config.step_interval_ms),
        |step, response| {
            println!("Light: {}, Cars: {:?}", response.light, response.car_positions);
            if let Err(e) = recorder.record_step(step, response) {
                eprintln!("Error recording simulation step: {}", e);
            }
        },
    )
    .await;

    ExitCode::SUCCESS
}
