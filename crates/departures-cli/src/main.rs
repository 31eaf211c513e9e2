// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::Result;
use clap::{Parser, Subcommand};
use departures_core::search::meets_minimum_length;
use departures_core::settings::{Settings, SettingsManager};
use departures_core::{
    FlightSelectionEngine, SortKey, SortOrder, SortState, MINIMUM_SEARCH_LENGTH,
};
use log::debug;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Flight document: a file path or an http(s) URL
    #[arg(short, long, env = "DEPARTURES_SOURCE", global = true)]
    source: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every loaded flight
    List,
    /// Suggest airports matching a search query
    Airports { query: String },
    /// Show the next departures for an airport (exact name)
    Show {
        airport: String,
        /// Sort key: date or time
        #[arg(long)]
        sort_by: Option<SortKey>,
        /// Sort direction: asc or desc
        #[arg(long, default_value = "asc")]
        order: SortOrder,
        /// Flip the direction for a key, as the list header buttons do (repeatable)
        #[arg(long)]
        toggle: Vec<SortKey>,
    },
    /// Print or persist the default source and timeout
    Config {
        /// Save --source/--timeout to settings.json
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

    let manager = SettingsManager::new();
    let mut settings = manager.load()?;
    if let Some(source) = &cli.source {
        settings.source = Some(source.clone());
    }
    if let Some(timeout) = cli.timeout {
        settings.timeout_secs = timeout;
    }
    debug!(
        "Settings resolved — config_path={} source={} timeout_secs={}",
        manager.path().display(),
        settings.flight_source(),
        settings.timeout_secs
    );

    match cli.command {
        Commands::Config { save } => {
            if save {
                manager.save(&settings)?;
                println!("Saved settings to {}", manager.path().display());
            }
            println!("source  = {}", settings.flight_source());
            println!("timeout = {}s", settings.timeout_secs);
        }
        Commands::List => {
            let Some(engine) = load_engine(&settings) else {
                return Ok(());
            };
            println!(
                "{} flights from {}",
                engine.all_flights().len(),
                settings.flight_source()
            );
            for flight in engine.all_flights() {
                println!("{}", flight.to_display_line());
            }
        }
        Commands::Airports { query } => {
            if !meets_minimum_length(&query) {
                println!(
                    "Type at least {} characters to search airports",
                    MINIMUM_SEARCH_LENGTH
                );
                return Ok(());
            }
            let Some(mut engine) = load_engine(&settings) else {
                return Ok(());
            };
            engine.set_search_query(query);
            if engine.suggested_airports().is_empty() {
                println!("No airports found");
            }
            for airport in engine.suggested_airports() {
                println!("{}", airport);
            }
        }
        Commands::Show {
            airport,
            sort_by,
            order,
            toggle,
        } => {
            let Some(mut engine) = load_engine(&settings) else {
                return Ok(());
            };
            engine.select_airport(&airport);
            if let Some(key) = sort_by {
                engine.sort_flight_results(key, order);
            }
            for key in toggle {
                engine.toggle_sort(key);
            }

            match engine.selected_flights() {
                Some([]) | None => {
                    println!("No flights found for the selected airport.");
                }
                Some(flights) => {
                    println!("{}", sort_header(engine.sort_state()));
                    for flight in flights {
                        println!("{}", flight.to_display_line());
                    }
                }
            }
        }
    }

    Ok(())
}

/// A failed load is reported to the user and ends the command without error.
fn load_engine(settings: &Settings) -> Option<FlightSelectionEngine> {
    let source = settings.flight_source();
    let engine = FlightSelectionEngine::load(&source, settings.timeout());
    if let Some(e) = engine.load_error() {
        println!("No flights available ({}): {}", source, e);
        return None;
    }
    Some(engine)
}

fn sort_header(state: SortState) -> String {
    let mark = |order: Option<SortOrder>| order.map(SortOrder::indicator).unwrap_or("");
    format!(
        "Date {}  Time {}",
        mark(state.get(SortKey::Date)),
        mark(state.get(SortKey::ExpectedTime))
    )
}
