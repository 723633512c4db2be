// benches/bench_step_positions.rs
use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, Criterion, PlotConfiguration,
};
use std::time::Duration;
use traffic_monitor::clock::ManualClock;
use traffic_monitor::simulation_engine::{run_simulation_step, step_positions};
use traffic_monitor::{CatchUpPolicy, LightPhase, PhaseDurations, SingleLightCycler};

fn create_positions(num_cars: usize) -> Vec<f64> {
    (0..num_cars).map(|i| i as f64 * 30.0).collect()
}

fn bench_step_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_positions");

    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));
    group.warm_up_time(Duration::from_secs(2));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    for &size in [50, 100, 200].iter() {
        let positions = create_positions(size);
        for phase in [LightPhase::Green, LightPhase::Yellow, LightPhase::Red] {
            group.bench_function(format!("{}_size_{}", phase, size), |b| {
                b.iter(|| black_box(step_positions(black_box(&positions), phase, 2.0)));
            });
        }
    }
    group.finish();
}

fn bench_run_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_simulation_step");

    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));
    group.warm_up_time(Duration::from_secs(2));

    // The clock ticks a little on every iteration so the light keeps cycling.
    let clock = ManualClock::new(0.0);
    let cycler = SingleLightCycler::with_clock(
        clock.clone(),
        PhaseDurations::single_light(),
        CatchUpPolicy::SingleStep,
    );
    for &size in [50, 100, 200].iter() {
        let positions = create_positions(size);
        group.bench_function(format!("size_{}", size), |b| {
            b.iter(|| {
                clock.advance(0.5);
                black_box(run_simulation_step(&cycler, &positions, 2.0));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step_positions, bench_run_simulation_step);
criterion_main!(benches);
