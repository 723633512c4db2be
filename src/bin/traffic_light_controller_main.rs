use std::process::ExitCode;
use std::sync::Arc;
use tokio::time::Duration;
use traffic_monitor::control_system::run_intersection_cycle;
use traffic_monitor::monitoring::SimulationRecorder;
use traffic_monitor::{IntersectionController, SimulationConfig};

const CYCLES: usize = 25;

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

    println!("Starting intersection controller...");
    let controller = Arc::new(IntersectionController::from_config(&config));
    let recorder = SimulationRecorder::new(".");
    run_intersection_cycle(
        Arc::clone(&controller),
        CYCLES,
        Duration::from_millis(config.step_interval_ms),
        |_, state| {
            println!("NS={} | EW={}", state.north_south, state.east_west);
            if let Err(e) = recorder.record_intersection(state) {
                eprintln!("Error recording intersection state: {}", e);
            }
        },
    )
    .await;

    ExitCode::SUCCESS
}
