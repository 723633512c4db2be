use std::sync::Arc;
use std::thread;

use traffic_monitor::clock::ManualClock;
use traffic_monitor::simulation_engine::{run_simulation_step, AxisSignal, TrafficSimulation};
use traffic_monitor::{
    Axis, CatchUpPolicy, IntersectionController, LightPhase, PhaseDurations, SimulationConfig,
    SingleLightCycler,
};

const T0: f64 = 1_760_000_000.0;

fn cycler_at(clock: &ManualClock) -> SingleLightCycler<ManualClock> {
    SingleLightCycler::with_clock(
        clock.clone(),
        PhaseDurations::single_light(),
        CatchUpPolicy::SingleStep,
    )
}

#[test]
fn polling_timeline_matches_phase_durations() {
    let clock = ManualClock::new(T0);
    let cycler = cycler_at(&clock);

    let timeline = [
        (1.0, LightPhase::Red),
        (5.1, LightPhase::Green),
        (5.2, LightPhase::Green),
        (11.2, LightPhase::Yellow),
        (13.3, LightPhase::Red),
    ];
    for (offset, expected) in timeline {
        clock.set(T0 + offset);
        assert_eq!(cycler.get_current_phase(), expected, "at t0+{}", offset);
    }
}

#[test]
fn default_cars_move_on_green() {
    let clock = ManualClock::new(T0);
    let cycler = cycler_at(&clock);
    clock.advance(5.0);

    let response = run_simulation_step(&cycler, &[0.0, 150.0, 300.0], 2.0);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"light": "GREEN", "car_positions": [2.0, 152.0, 302.0]})
    );
}

#[test]
fn car_positions_accumulate_across_polls() {
    let clock = ManualClock::new(T0);
    let mut sim = TrafficSimulation::from_config(cycler_at(&clock), &SimulationConfig::default());

    // Red for the first poll, then one poll per second through the green phase.
    sim.step();
    clock.advance(5.0);
    for _ in 0..6 {
        let response = sim.step();
        assert_eq!(response.light, LightPhase::Green);
        clock.advance(1.0);
    }
    assert_eq!(sim.car_positions(), &[12.0, 162.0, 312.0]);

    let yellow = sim.step();
    assert_eq!(yellow.light, LightPhase::Yellow);
    assert_eq!(yellow.car_positions, vec![13.0, 163.0, 313.0]);
}

#[test]
fn concurrent_queries_advance_once() {
    let clock = ManualClock::new(T0);
    let cycler = Arc::new(cycler_at(&clock));
    clock.set(T0 + 5.0);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cycler = Arc::clone(&cycler);
            thread::spawn(move || (0..50).map(|_| cycler.get_current_phase()).collect::<Vec<_>>())
        })
        .collect();

    for handle in handles {
        let phases = handle.join().unwrap();
        assert!(phases.iter().all(|phase| *phase == LightPhase::Green));
    }
    assert_eq!(cycler.last_transition_time(), T0 + 5.0);
}

#[test]
fn intersection_axes_are_mutually_exclusive_under_threads() {
    let clock = ManualClock::new(T0);
    let controller = Arc::new(IntersectionController::with_clock(
        clock.clone(),
        PhaseDurations::intersection(),
        CatchUpPolicy::SingleStep,
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let controller = Arc::clone(&controller);
            let clock = clock.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    clock.advance(0.25);
                    let state = controller.get_intersection_state();
                    assert!(
                        !(state.north_south == LightPhase::Green
                            && state.east_west == LightPhase::Green)
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn cars_can_follow_an_intersection_axis() {
    let clock = ManualClock::new(T0);
    let controller = Arc::new(IntersectionController::with_clock(
        clock.clone(),
        PhaseDurations::intersection(),
        CatchUpPolicy::SingleStep,
    ));
    let mut north_south = TrafficSimulation::with_positions(
        AxisSignal {
            controller: Arc::clone(&controller),
            axis: Axis::NorthSouth,
        },
        vec![0.0],
        2.0,
    );

    assert_eq!(north_south.step().car_positions, vec![2.0]); // green
    clock.advance(7.0);
    assert_eq!(north_south.step().car_positions, vec![3.0]); // yellow
    clock.advance(2.0);
    assert_eq!(north_south.step().car_positions, vec![3.0]); // red
    assert_eq!(controller.light_color(Axis::EastWest), LightPhase::Green);
}
