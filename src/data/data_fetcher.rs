use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::global_variables::{
    MOCK_ACCIDENT_TYPES, MOCK_CITIES, MOCK_FATAL_PROBABILITY, MOCK_TRAFFIC_LEVELS,
};
use crate::shared_data::{current_timestamp, AccidentRecord, TrafficRecord};

/// Where traffic and accident rows come from. The app only ships a mock source;
/// a live feed would implement the same trait.
pub trait TrafficSource {
    fn fetch_traffic(&mut self, num_records: usize) -> Vec<TrafficRecord>;

    /// Accidents spread over the `span_days` days up to and including `today`.
    fn fetch_accidents(&mut self, num_records: usize, today: u64, span_days: u64)
        -> Vec<AccidentRecord>;
}

/// Random traffic and accident data for local runs.
pub struct MockTrafficSource<R: Rng = StdRng> {
    rng: R,
}

impl MockTrafficSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl<R: Rng> MockTrafficSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TrafficSource for MockTrafficSource<R> {
    fn fetch_traffic(&mut self, num_records: usize) -> Vec<TrafficRecord> {
        log::info!("Using mock traffic data ({} records)", num_records);
        generate_mock_traffic_data(&mut self.rng, num_records, current_timestamp())
    }

    fn fetch_accidents(
        &mut self,
        num_records: usize,
        today: u64,
        span_days: u64,
    ) -> Vec<AccidentRecord> {
        log::info!("Using mock accident data ({} records)", num_records);
        generate_mock_accident_data(&mut self.rng, num_records, today, span_days)
    }
}

fn pick<'a, R: Rng>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options[rng.random_range(0..options.len())]
}

pub fn generate_mock_traffic_data<R: Rng>(
    rng: &mut R,
    num_records: usize,
    timestamp: u64,
) -> Vec<TrafficRecord> {
    (0..num_records)
        .map(|_| TrafficRecord {
            id: 0,
            city: pick(rng, &MOCK_CITIES).to_string(),
            traffic_level: pick(rng, &MOCK_TRAFFIC_LEVELS).to_string(),
            accidents: rng.random_range(0..=20),
            avg_speed: rng.random_range(10..=65),
            accident_type: pick(rng, &MOCK_ACCIDENT_TYPES).to_string(),
            timestamp,
        })
        .collect()
}

pub fn generate_mock_accident_data<R: Rng>(
    rng: &mut R,
    num_records: usize,
    today: u64,
    span_days: u64,
) -> Vec<AccidentRecord> {
    let span = span_days.max(1);
    (0..num_records)
        .map(|_| {
            let city = pick(rng, &MOCK_CITIES).to_string();
            let accident_type = pick(rng, &MOCK_ACCIDENT_TYPES).to_string();
            let description = format!("{} collision reported in {}", accident_type, city);
            AccidentRecord {
                id: 0,
                day: today.saturating_sub(rng.random_range(0..span)),
                fatal: rng.random_bool(MOCK_FATAL_PROBABILITY),
                city,
                accident_type,
                description,
            }
        })
        .collect()
}
