use plotters::prelude::*;
use std::path::Path;

use crate::data::stats::AccidentSummary;
use crate::error::{Error, Result};

fn chart_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Chart(e.to_string())
}

/// Axis ranges for the accident trend chart: days on x, accident counts on y.
pub fn trend_ranges(summary: &AccidentSummary) -> Option<(std::ops::Range<u64>, std::ops::Range<usize>)> {
    let first_day = summary.trend.iter().map(|(day, _)| *day).min()?;
    let last_day = summary.trend.iter().map(|(day, _)| *day).max()?;
    let max_count = summary.trend.iter().map(|(_, count)| *count).max()?;
    Some((first_day..last_day + 1, 0..max_count + 1))
}

// Draws accidents per day as a line chart with a marker on each day.
pub fn render_accident_trend<P: AsRef<Path>>(summary: &AccidentSummary, path: P) -> Result<()> {
    let (days, counts) = trend_ranges(summary)
        .ok_or_else(|| Error::Chart("no accident data to plot".to_string()))?;

    let backend = BitMapBackend::new(path.as_ref(), (800, 600));
    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Accidents Per Day", ("sans-serif", 20))
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(days, counts)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Day (since epoch)")
        .y_desc("Accidents")
        .draw()
        .map_err(chart_err)?;
    chart
        .draw_series(LineSeries::new(summary.trend.iter().copied(), &RED))
        .map_err(chart_err)?;
    chart
        .draw_series(
            summary
                .trend
                .iter()
                .map(|(day, count)| Circle::new((*day, *count), 4, RED.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    log::info!("Accident trend chart saved to {}", path.as_ref().display());
    Ok(())
}
