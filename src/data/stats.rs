use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::data::store::TrafficStore;
use crate::shared_data::TrafficRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySummary {
    pub city: String,
    pub total_records: usize,
    pub average_speed: f64,
    pub average_accidents: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentSummary {
    pub total_accidents: usize,
    pub fatal_accidents: usize,
    /// (day, accidents on that day), oldest day first.
    pub trend: Vec<(u64, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendStatus {
    NoData,
    Stable,
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Percentage change against the previous period.
    pub trend: f64,
    pub status: TrendStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub total_records: usize,
    pub unique_cities: usize,
    pub average_speed: f64,
    pub average_accidents: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn average_speed(rows: &[TrafficRecord]) -> f64 {
    round2(mean(rows.iter().map(|r| r.avg_speed as f64)))
}

fn average_accidents(rows: &[TrafficRecord]) -> f64 {
    round2(mean(rows.iter().map(|r| r.accidents as f64)))
}

pub fn summarize_city_traffic(store: &TrafficStore, city: &str) -> Option<CitySummary> {
    let rows = store.get_city_data(city);
    if rows.is_empty() {
        log::warn!("No traffic data for {}", city);
        return None;
    }
    Some(CitySummary {
        city: city.to_string(),
        total_records: rows.len(),
        average_speed: average_speed(&rows),
        average_accidents: average_accidents(&rows),
    })
}

/// Accident totals over the last `days` days, with a per-day breakdown.
pub fn summarize_accidents(store: &TrafficStore, days: u64, today: u64) -> Option<AccidentSummary> {
    let rows = store.get_accident_data(days, today);
    if rows.is_empty() {
        log::warn!("No accident data available.");
        return None;
    }
    let mut daily: BTreeMap<u64, usize> = BTreeMap::new();
    for row in &rows {
        *daily.entry(row.day).or_default() += 1;
    }
    Some(AccidentSummary {
        total_accidents: rows.len(),
        fatal_accidents: rows.iter().filter(|r| r.fatal).count(),
        trend: daily.into_iter().collect(),
    })
}

/// Compares accidents in the last `days` days with the `days` days before that.
pub fn compute_trend_over_time(store: &TrafficStore, days: u64, today: u64) -> TrendReport {
    let current = store.get_accident_data(days, today).len();
    let both_periods = store.get_accident_data(days.saturating_mul(2), today).len();
    if current == 0 || both_periods == 0 {
        return TrendReport {
            trend: 0.0,
            status: TrendStatus::NoData,
        };
    }
    let previous = both_periods - current;
    if previous == 0 {
        return TrendReport {
            trend: 0.0,
            status: TrendStatus::Stable,
        };
    }
    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    TrendReport {
        trend: round2(change),
        status: if change > 0.0 {
            TrendStatus::Increase
        } else {
            TrendStatus::Decrease
        },
    }
}

pub fn overall_summary(store: &TrafficStore) -> Option<OverallSummary> {
    let rows = store.get_all_traffic_data();
    if rows.is_empty() {
        log::warn!("No traffic data found.");
        return None;
    }
    let cities: HashSet<&str> = rows
        .iter()
        .filter(|r| !r.city.is_empty())
        .map(|r| r.city.as_str())
        .collect();
    Some(OverallSummary {
        total_records: rows.len(),
        unique_cities: cities.len(),
        average_speed: average_speed(&rows),
        average_accidents: average_accidents(&rows),
    })
}
