//! CLI entry point for the Flight Delay Rater tool.
//!
//! Provides subcommands for building the full dashboard report from a flight
//! CSV, ranking route and airline health, listing filter options, and
//! generating sample data.

use anyhow::Result;
use clap::{Parser, Subcommand};
use flight_delay_rater::{
    config::RaterConfig,
    filter::{FilterSpec, filter_options},
    loader::load_dataset,
    output::{print_json, print_pretty, write_json, write_records},
    report::build_report,
    sample::generate_sample,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "flight_delay_rater")]
#[command(about = "A tool to analyze flight delays and rate route health", long_about = None)]
struct Cli {
    /// JSON config file (falls back to $FLIGHT_RATER_CONFIG)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dashboard report for a flight CSV from a file or URL
    Analyze {
        /// Path to file or URL to fetch (".gz" sources are decompressed)
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Only include this airline
        #[arg(long, default_value = "all")]
        airline: String,

        /// Only include this route, e.g. "NYC-LAX"
        #[arg(long, default_value = "all")]
        route: String,

        /// Lowest arrival delay to include, in minutes
        #[arg(long, allow_negative_numbers = true)]
        min_delay: Option<f64>,

        /// Highest arrival delay to include, in minutes
        #[arg(long, allow_negative_numbers = true)]
        max_delay: Option<f64>,

        /// Number of routes in the most-delayed ranking
        #[arg(long)]
        top_routes: Option<usize>,

        /// JSON file to write the report to; logged when omitted
        #[arg(short, long)]
        output: Option<String>,

        /// Log the report in Rust debug format instead of JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Rank route and airline health for a flight CSV
    Health {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// List the airlines and routes available for filtering
    Options {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Write a generated sample dataset as CSV
    Sample {
        /// CSV file to write
        #[arg(short, long, default_value = "sample_flights.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/flight_delay_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("flight_delay_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = RaterConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            source,
            airline,
            route,
            min_delay,
            max_delay,
            top_routes,
            output,
            pretty,
        } => {
            let (default_min, default_max) = config.default_delay_range;
            let filter = FilterSpec::default()
                .with_airline(&airline)
                .with_route(&route)
                .with_delay_range(
                    min_delay.unwrap_or(default_min),
                    max_delay.unwrap_or(default_max),
                );

            let dataset = load_dataset(&source).await;
            if dataset.origin.is_sample() {
                warn!(origin = ?dataset.origin, "Report is built from generated sample data");
            }

            let report = build_report(&dataset, &filter, top_routes.unwrap_or(config.top_routes));
            info!(
                total = report.total_records,
                filtered = report.filtered_records,
                overall_health = report.overall_health.score,
                grade = %report.overall_health.grade,
                "Report built"
            );

            match output {
                Some(path) => write_json(&path, &report)?,
                None if pretty => print_pretty(&report),
                None => print_json(&report)?,
            }
        }
        Commands::Health { source } => {
            let dataset = load_dataset(&source).await;
            let report = build_report(&dataset, &config.base_filter(), config.top_routes);

            for (rank, route) in report.route_health.iter().enumerate() {
                info!(
                    rank = rank + 1,
                    route = %route.route,
                    score = route.normalized_health_score,
                    raw_score = route.health_score,
                    delay_percent = route.delay_percent,
                    flights = route.total_flights,
                    grade = %route.grade,
                    "Route"
                );
            }

            for (rank, airline) in report.airline_health.iter().enumerate() {
                info!(
                    rank = rank + 1,
                    airline = %airline.airline,
                    score = airline.health_score,
                    on_time_rate = airline.on_time_rate,
                    severe_delay_rate = airline.severe_delay_rate,
                    flights = airline.total_flights,
                    grade = %airline.grade,
                    "Airline"
                );
            }

            info!(
                routes = report.route_health.len(),
                airlines = report.airline_health.len(),
                overall_health = report.overall_health.score,
                grade = %report.overall_health.grade,
                "Health summary"
            );
        }
        Commands::Options { source } => {
            let dataset = load_dataset(&source).await;
            let options = filter_options(&dataset.records);

            info!(
                airlines = options.airlines.len(),
                routes = options.routes.len(),
                "Filter options"
            );
            print_json(&options)?;
        }
        Commands::Sample { output } => {
            let records = generate_sample();
            write_records(&output, &records)?;
            info!(path = %output, rows = records.len(), "Sample data written");
        }
    }

    Ok(())
}
