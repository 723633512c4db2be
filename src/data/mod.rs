// data/mod.rs
pub mod alerts;
pub mod data_fetcher;
pub mod map_data;
pub mod stats;
pub mod store;

pub use alerts::{analyze_accident_spikes, analyze_traffic_conditions, generate_alerts};
pub use data_fetcher::{MockTrafficSource, TrafficSource};
pub use map_data::{prepare_map_data, MapPoint};
pub use stats::{
    compute_trend_over_time, overall_summary, summarize_accidents, summarize_city_traffic,
    AccidentSummary, CitySummary, OverallSummary, TrendReport, TrendStatus,
};
pub use store::TrafficStore;
