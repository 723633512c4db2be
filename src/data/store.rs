use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::shared_data::{AccidentRecord, TrafficRecord};

#[derive(Debug, Default)]
struct Tables {
    traffic: Vec<TrafficRecord>,
    accidents: Vec<AccidentRecord>,
    next_traffic_id: u64,
    next_accident_id: u64,
}

/// In-memory traffic and accident tables shared by the stats, alert and map code.
/// Ids are assigned on insert, starting at 1.
#[derive(Debug, Default)]
pub struct TrafficStore {
    tables: Mutex<Tables>,
}

impl TrafficStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_bulk_traffic_data(&self, records: Vec<TrafficRecord>) -> usize {
        if records.is_empty() {
            log::warn!("No traffic data to insert.");
            return 0;
        }
        let mut tables = self.tables();
        let count = records.len();
        for mut record in records {
            tables.next_traffic_id += 1;
            record.id = tables.next_traffic_id;
            tables.traffic.push(record);
        }
        log::info!("Inserted {} traffic records.", count);
        count
    }

    /// Every traffic record, newest insert first.
    pub fn get_all_traffic_data(&self) -> Vec<TrafficRecord> {
        let mut rows = self.tables().traffic.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows
    }

    /// One city's traffic records, most recent timestamp first.
    pub fn get_city_data(&self, city: &str) -> Vec<TrafficRecord> {
        let mut rows: Vec<TrafficRecord> = self
            .tables()
            .traffic
            .iter()
            .filter(|record| record.city == city)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        rows
    }

    pub fn insert_bulk_accident_data(&self, records: Vec<AccidentRecord>) -> usize {
        if records.is_empty() {
            log::warn!("No accident data to insert.");
            return 0;
        }
        let mut tables = self.tables();
        let count = records.len();
        for mut record in records {
            tables.next_accident_id += 1;
            record.id = tables.next_accident_id;
            tables.accidents.push(record);
        }
        log::info!("Inserted {} accident records.", count);
        count
    }

    /// Accidents on or after `today - days`, latest day first.
    pub fn get_accident_data(&self, days: u64, today: u64) -> Vec<AccidentRecord> {
        let since = today.saturating_sub(days);
        let mut rows: Vec<AccidentRecord> = self
            .tables()
            .accidents
            .iter()
            .filter(|record| record.day >= since)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.day.cmp(&a.day).then(b.id.cmp(&a.id)));
        rows
    }

    pub fn traffic_len(&self) -> usize {
        self.tables().traffic.len()
    }

    pub fn accident_len(&self) -> usize {
        self.tables().accidents.len()
    }

    /// Writes the traffic table to `path` as CSV with a header row, oldest first.
    pub fn export_traffic_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let rows = self.tables().traffic.clone();
        let mut wtr = csv::Writer::from_path(path)?;
        for row in &rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(rows.len())
    }

    /// Loads traffic rows from a CSV file written by [`export_traffic_csv`]. Ids are reassigned.
    ///
    /// [`export_traffic_csv`]: TrafficStore::export_traffic_csv
    pub fn import_traffic_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let mut rdr = csv::Reader::from_path(path)?;
        let mut records = Vec::new();
        for result in rdr.deserialize() {
            let record: TrafficRecord = result?;
            records.push(record);
        }
        Ok(self.insert_bulk_traffic_data(records))
    }
}
