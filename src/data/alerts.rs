use std::collections::BTreeMap;

use crate::data::store::TrafficStore;
use crate::global_variables::{
    ACCIDENT_SPIKE_DAYS, ACCIDENT_SPIKE_THRESHOLD, CONGESTION_ACCIDENT_LIMIT,
    CONGESTION_SPEED_THRESHOLD,
};
use crate::shared_data::{current_timestamp, Alert, AlertKind};

/// One alert per traffic record that is slower than `threshold` km/h or has too many accidents.
pub fn analyze_traffic_conditions(store: &TrafficStore, threshold: u32) -> Vec<Alert> {
    let rows = store.get_all_traffic_data();
    if rows.is_empty() {
        log::warn!("No traffic data for alert analysis.");
        return Vec::new();
    }
    let timestamp = current_timestamp();
    rows.iter()
        .filter(|r| r.avg_speed < threshold || r.accidents > CONGESTION_ACCIDENT_LIMIT)
        .map(|r| Alert {
            kind: AlertKind::Traffic,
            city: r.city.clone(),
            message: format!(
                "Heavy traffic in {}: avg speed {} km/h, accidents {}.",
                r.city, r.avg_speed, r.accidents
            ),
            timestamp,
        })
        .collect()
}

/// One alert per city with at least `spike_threshold` accidents in the last `days` days.
/// Cities come out in alphabetical order.
pub fn analyze_accident_spikes(
    store: &TrafficStore,
    days: u64,
    spike_threshold: usize,
    today: u64,
) -> Vec<Alert> {
    let rows = store.get_accident_data(days, today);
    if rows.is_empty() {
        log::warn!("No accident data for alert analysis.");
        return Vec::new();
    }
    let mut city_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in &rows {
        *city_counts.entry(row.city.as_str()).or_default() += 1;
    }
    let timestamp = current_timestamp();
    city_counts
        .into_iter()
        .filter(|(_, count)| *count >= spike_threshold)
        .map(|(city, count)| Alert {
            kind: AlertKind::Accident,
            city: city.to_string(),
            message: format!(
                "Accident spike detected in {}: {} accidents in the last {} days.",
                city, count, days
            ),
            timestamp,
        })
        .collect()
}

/// Traffic alerts followed by accident-spike alerts, using the default thresholds.
pub fn generate_alerts(store: &TrafficStore, today: u64) -> Vec<Alert> {
    let mut alerts = analyze_traffic_conditions(store, CONGESTION_SPEED_THRESHOLD);
    alerts.extend(analyze_accident_spikes(
        store,
        ACCIDENT_SPIKE_DAYS,
        ACCIDENT_SPIKE_THRESHOLD,
        today,
    ));
    if alerts.is_empty() {
        log::info!("No alerts generated. System stable.");
    } else {
        log::info!("{} alerts generated.", alerts.len());
    }
    alerts
}
