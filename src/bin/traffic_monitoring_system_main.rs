use std::process::ExitCode;
use traffic_monitor::data::{
    compute_trend_over_time, generate_alerts, overall_summary, prepare_map_data,
    summarize_accidents, summarize_city_traffic, MockTrafficSource, TrafficSource, TrafficStore,
};
use traffic_monitor::global_variables::{ACCIDENT_TREND_PNG, MOCK_CITIES, TRAFFIC_DATA_CSV};
use traffic_monitor::monitoring::render_accident_trend;
use traffic_monitor::shared_data::current_day;

const TRAFFIC_RECORDS: usize = 50;
const ACCIDENT_RECORDS: usize = 40;
const ACCIDENT_SPAN_DAYS: u64 = 30;
const SUMMARY_DAYS: u64 = 7;

fn run() -> traffic_monitor::Result<()> {
    let today = current_day();
    let store = TrafficStore::new();
    let mut source = MockTrafficSource::from_entropy();

    store.insert_bulk_traffic_data(source.fetch_traffic(TRAFFIC_RECORDS));
    store.insert_bulk_accident_data(source.fetch_accidents(ACCIDENT_RECORDS, today, ACCIDENT_SPAN_DAYS));

    if let Some(overall) = overall_summary(&store) {
        println!("Overall: {}", serde_json::to_string_pretty(&overall)?);
    }
    for city in MOCK_CITIES {
        if let Some(summary) = summarize_city_traffic(&store, city) {
            println!("{}", serde_json::to_string(&summary)?);
        }
    }

    let trend = compute_trend_over_time(&store, ACCIDENT_SPAN_DAYS / 2, today);
    println!("Accident trend: {:.2}% ({:?})", trend.trend, trend.status);

    for alert in generate_alerts(&store, today) {
        println!("[{:?}] {}", alert.kind, alert.message);
    }

    let points = prepare_map_data(&store, None, &mut rand::rng());
    println!("Prepared {} map points", points.len());

    let exported = store.export_traffic_csv(TRAFFIC_DATA_CSV)?;
    println!("Exported {} traffic records to {}", exported, TRAFFIC_DATA_CSV);

    if let Some(accidents) = summarize_accidents(&store, SUMMARY_DAYS, today) {
        println!(
            "Last {} days: {} accidents, {} fatal",
            SUMMARY_DAYS, accidents.total_accidents, accidents.fatal_accidents
        );
        render_accident_trend(&accidents, ACCIDENT_TREND_PNG)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    println!("Starting traffic monitoring system...");
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Monitoring error: {}", e);
            ExitCode::FAILURE
        }
    }
}
