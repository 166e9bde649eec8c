//! VVM departure monitor CLI
//!
//! Searches stops, validates stop configurations and monitors departures.

#![allow(clippy::print_stdout)]

mod tasks;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{
    ApplicationError, DeparturePort, DepartureSummary, MonitorSnapshot, StopConfigInput,
    StopRegistry, StopSetupService, ValidatedStop, sensor_readings,
};
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, VvmDepartureAdapter, init_logging};
use tracing::{info, warn};

/// VVM departure monitor
#[derive(Parser)]
#[command(name = "vvm-monitor")]
#[command(author, version, about = "VVM public transport departure monitor", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "VVM_MONITOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search stops by name
    Search {
        /// Part of the stop name
        keyword: String,
    },

    /// Check a stop configuration against the backend
    Validate {
        /// Stop identifier
        stop_id: String,

        /// Minutes ahead to show departures for
        #[arg(short, long, default_value_t = 15, allow_negative_numbers = true)]
        timeframe: i64,

        /// Only departures whose destination contains this text
        #[arg(short, long, default_value = "")]
        direction: String,
    },

    /// Show upcoming departures of a stop once
    Departures {
        /// Stop identifier
        stop_id: String,

        /// Minutes ahead to show departures for
        #[arg(short, long, default_value_t = 30, allow_negative_numbers = true)]
        timeframe: i64,

        /// Only departures whose destination contains this text
        #[arg(short, long, default_value = "")]
        direction: String,

        /// Print the sensor readings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monitor the configured stops until interrupted
    Watch {
        /// Print the sensor readings as JSON lines
        #[arg(long)]
        json: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Render a snapshot as a human-readable table
fn render_snapshot(title: &str, snapshot: &MonitorSnapshot) -> String {
    let mut out = format!(
        "🚏 {title} [{}], updated {}\n",
        snapshot.stop_id,
        snapshot.last_updated.format("%H:%M:%S")
    );
    for departure in &snapshot.departures {
        let delay = match departure.delay {
            0 => String::new(),
            d if d > 0 => format!(" +{d}"),
            d => format!(" {d}"),
        };
        out.push_str(&format!(
            "  {:>3} min{delay:<4} {:<12} {:>4}  → {}\n",
            departure.left, departure.kind, departure.line, departure.to
        ));
    }
    out
}

fn print_snapshot(title: &str, snapshot: &MonitorSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(&sensor_readings(snapshot))?);
    } else {
        print!("{}", render_snapshot(title, snapshot));
    }
    Ok(())
}

/// Line printed for an accepted stop; rejected input and backend failures
/// are errors
fn validation_report(result: Result<ValidatedStop, ApplicationError>) -> anyhow::Result<String> {
    match result {
        Ok(stop) => Ok(format!("✅ {} [{}], {}", stop.title, stop.stop_id, stop.window)),
        Err(e) if e.is_setup_error() => anyhow::bail!("❌ {e}"),
        Err(e) => Err(e).context("Stop could not be checked"),
    }
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(config.log_format, log_filter_from_verbosity(cli.verbose))?;

    let port: Arc<dyn DeparturePort> = Arc::new(VvmDepartureAdapter::new(&config.vvm)?);

    match cli.command {
        Commands::Search { keyword } => {
            let stops = port.find_stops(&keyword).await?;
            if stops.is_empty() {
                println!("No stops found for \"{keyword}\"");
            }
            for stop in stops {
                println!("{stop}");
            }
        },

        Commands::Validate {
            stop_id,
            timeframe,
            direction,
        } => {
            let input = StopConfigInput::new(stop_id)
                .with_timeframe(timeframe)
                .with_direction(direction);
            let result = StopSetupService::new(port).validate_stop(&input).await;
            println!("{}", validation_report(result)?);
        },

        Commands::Departures {
            stop_id,
            timeframe,
            direction,
            json,
        } => {
            let stop = ValidatedStop::try_from(
                &StopConfigInput::new(stop_id)
                    .with_timeframe(timeframe)
                    .with_direction(direction),
            )?;
            let summary =
                DepartureSummary::new(port, stop.stop_id.clone(), stop.window, stop.direction);
            match summary.refresh().await {
                Ok(snapshot) => print_snapshot(&stop.title, &snapshot, json)?,
                Err(ApplicationError::EmptyResult { .. }) => {
                    println!("No departures within {timeframe} min");
                },
                Err(e) => return Err(e.into()),
            }
        },

        Commands::Watch { json } => {
            let registry = Arc::new(StopRegistry::new(port));
            for input in config.stop_inputs() {
                let stop = match ValidatedStop::try_from(&input) {
                    Ok(stop) => stop,
                    Err(e) => {
                        warn!(stop_id = %input.stop_id, error = %e, "Stop skipped");
                        continue;
                    },
                };
                match registry.add(stop).await {
                    Ok(_) => {},
                    Err(e @ ApplicationError::NotReady { .. }) => {
                        warn!(
                            stop_id = %input.stop_id,
                            error = %e,
                            "Stop pending, retried on every refresh"
                        );
                    },
                    Err(e) => {
                        warn!(stop_id = %input.stop_id, error = %e, "Stop not added");
                    },
                }
            }
            if registry.is_empty() {
                anyhow::bail!("No stop could be added; check the [[stops]] configuration");
            }

            for stop in registry.stops() {
                if let Some(snapshot) = stop.summary.snapshot() {
                    print_snapshot(&stop.title, &snapshot, json)?;
                }
            }

            let handle = tasks::spawn_refresh_task(
                Arc::clone(&registry),
                config.polling.interval(),
                move |title, snapshot| {
                    if let Err(e) = print_snapshot(title, snapshot, json) {
                        warn!(error = %e, "Failed to print snapshot");
                    }
                },
            );

            tokio::signal::ctrl_c().await?;
            info!("Shutting down");
            handle.abort();
        },
    }

    Ok(())
}
