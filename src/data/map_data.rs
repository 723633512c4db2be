use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::store::TrafficStore;
use crate::shared_data::TrafficRecord;

/// (city, latitude, longitude, state)
const CITY_LOCATIONS: [(&str, f64, f64, &str); 9] = [
    ("San Francisco", 37.7749, -122.4194, "CA"),
    ("Los Angeles", 34.0522, -118.2437, "CA"),
    ("New York", 40.7128, -74.0060, "NY"),
    ("Chicago", 41.8781, -87.6298, "IL"),
    ("Seattle", 47.6062, -122.3321, "WA"),
    ("Houston", 29.7604, -95.3698, "TX"),
    ("Dallas", 32.7767, -96.7970, "TX"),
    ("Miami", 25.7617, -80.1918, "FL"),
    ("Boston", 42.3601, -71.0589, "MA"),
];

const JITTER_DEGREES: f64 = 0.02;

/// A traffic record placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    #[serde(flatten)]
    pub record: TrafficRecord,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

fn city_location(city: &str) -> Option<(f64, f64, &'static str)> {
    CITY_LOCATIONS
        .iter()
        .find(|(name, ..)| *name == city)
        .map(|(_, lat, lng, state)| (*lat, *lng, *state))
}

/// Gives each record coordinates near its city, jittered so markers don't overlap.
/// Unknown cities land somewhere in the continental US.
pub fn attach_coordinates<R: Rng>(records: Vec<TrafficRecord>, rng: &mut R) -> Vec<MapPoint> {
    let points: Vec<MapPoint> = records
        .into_iter()
        .map(|record| {
            let (lat, lng, state) = match city_location(&record.city) {
                Some(location) => location,
                None => (
                    rng.random_range(25.0..49.0),
                    rng.random_range(-124.0..-67.0),
                    "Unknown",
                ),
            };
            let latitude = round6(lat + rng.random_range(-JITTER_DEGREES..JITTER_DEGREES));
            let longitude = round6(lng + rng.random_range(-JITTER_DEGREES..JITTER_DEGREES));
            MapPoint {
                record,
                state: state.to_string(),
                latitude,
                longitude,
            }
        })
        .collect();
    log::info!("Processed {} map points with coordinates.", points.len());
    points
}

/// All stored records, or just one city's, ready for the map view.
pub fn prepare_map_data<R: Rng>(
    store: &TrafficStore,
    city_filter: Option<&str>,
    rng: &mut R,
) -> Vec<MapPoint> {
    let rows = match city_filter {
        Some(city) => {
            log::info!("Loading traffic data for city: {}", city);
            store.get_city_data(city)
        }
        None => store.get_all_traffic_data(),
    };
    if rows.is_empty() {
        log::warn!("No traffic data found. Returning empty list.");
        return Vec::new();
    }
    attach_coordinates(rows, rng)
}
