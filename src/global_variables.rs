// Single light cycle durations (seconds)
pub const CYCLER_RED_SECS: f64 = 5.0;
pub const CYCLER_GREEN_SECS: f64 = 6.0;
pub const CYCLER_YELLOW_SECS: f64 = 2.0;

// Intersection durations (seconds), timed against the north-south axis
pub const INTERSECTION_GREEN_SECS: f64 = 7.0;
pub const INTERSECTION_YELLOW_SECS: f64 = 2.0;
pub const INTERSECTION_RED_SECS: f64 = 7.0;

// Shortest phase a config may ask for.
pub const MIN_PHASE_SECS: f64 = 0.001;

// Car movement
pub const DEFAULT_CAR_SPEED: f64 = 2.0;
pub const YELLOW_SPEED_FACTOR: f64 = 0.5;
pub const INITIAL_CAR_POSITIONS: [f64; 3] = [0.0, 150.0, 300.0];
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 1000;

// Environment variables read by SimulationConfig::from_env
pub const ENV_CONFIG_PATH: &str = "TRAFFIC_CONFIG";
pub const ENV_CAR_SPEED: &str = "TRAFFIC_CAR_SPEED";
pub const ENV_STEP_INTERVAL_MS: &str = "TRAFFIC_STEP_INTERVAL_MS";
pub const ENV_CATCH_UP: &str = "TRAFFIC_CATCH_UP";

// Output files
pub const SIMULATION_STEPS_CSV: &str = "simulation_steps.csv";
pub const INTERSECTION_STATES_CSV: &str = "intersection_states.csv";
pub const TRAFFIC_DATA_CSV: &str = "traffic_data.csv";
pub const ACCIDENT_TREND_PNG: &str = "accident_trend.png";

// Mock data tables
pub const MOCK_CITIES: [&str; 5] = [
    "San Francisco",
    "Los Angeles",
    "New York",
    "Chicago",
    "Seattle",
];
pub const MOCK_TRAFFIC_LEVELS: [&str; 4] = ["Low", "Moderate", "High", "Severe"];
pub const MOCK_ACCIDENT_TYPES: [&str; 4] = ["Rear-end", "Side-impact", "Head-on", "Rollover"];
pub const MOCK_FATAL_PROBABILITY: f64 = 0.1;

// Alert thresholds
pub const CONGESTION_SPEED_THRESHOLD: u32 = 70;
pub const CONGESTION_ACCIDENT_LIMIT: u32 = 5;
pub const ACCIDENT_SPIKE_DAYS: u64 = 3;
pub const ACCIDENT_SPIKE_THRESHOLD: usize = 3;

pub const SECONDS_PER_DAY: u64 = 86_400;
