use anyhow::Context;
use clap::{Parser, Subcommand};
use paddock::config::{Config, ConfigLoader};
use paddock::output::{FormatType, OutputFormatter};
use paddock::source::{CachedSource, CsvDataset, ResultSource};
use paddock::StatsEngine;
use std::path::PathBuf;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

/// Aggregate historical motor-racing results
#[derive(Parser)]
#[command(name = "paddock")]
#[command(about = "paddock - Driver, constructor and circuit statistics from race results", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the results CSV files
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Output format: json, json-pretty, markdown, csv or text
    #[arg(short = 'f', long, value_name = "FMT", global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Views over one constructor's results
    Constructor {
        /// Constructor id
        id: u32,
        #[command(subcommand)]
        view: ConstructorView,
    },
    /// Views over one driver's results
    Driver {
        /// Driver id
        id: u32,
        #[command(subcommand)]
        view: DriverView,
    },
    /// Compare two drivers over the races they shared
    HeadToHead {
        /// First driver id
        driver1: u32,
        /// Second driver id
        driver2: u32,
    },
    /// Most frequent reasons for not finishing
    DnfCauses,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ConstructorView {
    /// Drivers by total points
    Drivers,
    /// Season summaries, newest first
    Seasons,
    /// Circuit summaries by total points
    Circuits,
    /// Top countries by average points per race
    Geo,
    /// Poles, fastest laps and result distribution
    Dashboard,
    /// Raw status counts
    Status,
    /// Points per race in calendar order
    Heatmap,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum DriverView {
    /// Career totals, rates and teams
    Career,
    /// Season-by-season form
    Evolution,
    /// Best circuits by average finish
    Circuits,
    /// Outcome category counts
    Status,
    /// Cumulative points and races per season
    Trajectory,
    /// Finishing position histogram
    Positions,
    /// Season-by-season teammate battles
    Teammates,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose, config.log_level.as_deref());
    debug!("paddock started with verbosity level: {}", cli.verbose);
    trace!("Resolved configuration: {:?}", config);

    match run(&cli.command, &config) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(format) = &cli.format {
        config.format = format.parse::<FormatType>()?;
    }
    Ok(config)
}

/// `-v` flags win; otherwise the configured level, otherwise warnings only
fn init_tracing(verbose: u8, configured: Option<&str>) {
    let directive = match (verbose, configured) {
        (0, Some(level)) => level,
        (0, None) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();
}

fn run(command: &Commands, config: &Config) -> anyhow::Result<String> {
    let dataset = CsvDataset::load(&config.data_dir).with_context(|| {
        format!("Failed to load dataset from {}", config.data_dir.display())
    })?;
    let formatter = OutputFormatter::new(config.format);

    if config.cache_snapshots {
        execute(&StatsEngine::new(CachedSource::new(dataset)), command, &formatter)
    } else {
        execute(&StatsEngine::new(dataset), command, &formatter)
    }
}

fn execute<S: ResultSource>(
    engine: &StatsEngine<S>,
    command: &Commands,
    formatter: &OutputFormatter,
) -> anyhow::Result<String> {
    let rendered = match *command {
        Commands::Constructor { id, view } => match view {
            ConstructorView::Drivers => formatter.format(&engine.constructor_drivers(id)?),
            ConstructorView::Seasons => formatter.format(&engine.constructor_seasons(id)?),
            ConstructorView::Circuits => formatter.format(&engine.constructor_circuits(id)?),
            ConstructorView::Geo => formatter.format(&engine.constructor_geo(id)?),
            ConstructorView::Dashboard => formatter.format(&engine.constructor_dashboard(id)?),
            ConstructorView::Status => formatter.format(&engine.constructor_status(id)?),
            ConstructorView::Heatmap => formatter.format(&engine.constructor_heatmap(id)?),
        },
        Commands::Driver { id, view } => match view {
            DriverView::Career => formatter.format(&engine.driver_career(id)?),
            DriverView::Evolution => formatter.format(&engine.driver_evolution(id)?),
            DriverView::Circuits => formatter.format(&engine.driver_circuits(id)?),
            DriverView::Status => formatter.format(&engine.driver_status(id)?),
            DriverView::Trajectory => formatter.format(&engine.driver_trajectory(id)?),
            DriverView::Positions => formatter.format(&engine.driver_positions(id)?),
            DriverView::Teammates => formatter.format(&engine.driver_teammates(id)?),
        },
        Commands::HeadToHead { driver1, driver2 } => {
            formatter.format(&engine.head_to_head(driver1, driver2)?)
        }
        Commands::DnfCauses => formatter.format(&engine.dnf_causes()?),
    }
    .context("Failed to render output")?;

    Ok(if rendered.ends_with('\n') {
        rendered
    } else {
        rendered + "\n"
    })
}
