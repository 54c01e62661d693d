// Bikeshare Explorer - Main executable
// Author: Gabriel Demetrios Lafis

use std::io;
use std::process;

use anyhow::Context;
use clap::{App, Arg};
use log::{error, info};

use bikeshare_explorer::{
    console::{Console, RowViewer, Session},
    utils::{init_logging, parse_level, Config, Query},
};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = App::new("Bikeshare Explorer")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Explore US bikeshare trip data")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file (JSON or YAML)")
                .takes_value(true),
        )
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding the city trip files")
                .takes_value(true),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Sets the log level (off, error, warn, info, debug, trace)")
                .takes_value(true),
        )
        .arg(
            Arg::new("city")
                .long("city")
                .value_name("CITY")
                .help("Run once for this city without prompting")
                .takes_value(true),
        )
        .arg(
            Arg::new("month")
                .long("month")
                .value_name("MONTH")
                .help("Month filter for --city: all, january .. june")
                .takes_value(true)
                .requires("city"),
        )
        .arg(
            Arg::new("day")
                .long("day")
                .value_name("DAY")
                .help("Day filter for --city: all, monday .. sunday")
                .takes_value(true)
                .requires("city"),
        )
        .get_matches();

    // Load configuration
    let mut config = match matches.value_of("config") {
        Some(path) => Config::from_file(path).with_context(|| format!("loading config {}", path))?,
        None => Config::default(),
    };

    if let Some(dir) = matches.value_of("data-dir") {
        config.data.data_dir = dir.to_string();
    }

    let level = matches
        .value_of("log-level")
        .map(parse_level)
        .unwrap_or_else(|| config.log_level_filter());

    // Initialize logging
    if let Err(err) = init_logging(level, config.logging.file.as_deref()) {
        eprintln!("Error initializing logger: {}", err);
    }

    let registry = config.registry();
    let session = Session::new(&registry, RowViewer::new(config.viewer.page_size));

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let result = match matches.value_of("city") {
        Some(city) => {
            let query = Query::parse(
                city,
                matches.value_of("month").unwrap_or("all"),
                matches.value_of("day").unwrap_or("all"),
            )?;
            info!("Running single query: {:?}", query);
            session.run_query(&mut console, query, false)
        }
        None => session.run_interactive(&mut console),
    };

    if let Err(err) = result {
        if err.is_missing_source() {
            error!("{}", err);
            eprintln!(
                "{}. Program is exiting and must be restarted after the file has been saved to the referenced path.",
                err
            );
            process::exit(1);
        }
        return Err(err.into());
    }

    Ok(())
}
