use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::App;
use crate::board::ScheduleBoard;
use crate::catalog::Weekday;
use crate::config::ConfigLoader;
use crate::schedule::DayResolver;

pub mod commands;

use self::commands::{ListArgs, PeriodArgs, TodayArgs};

#[derive(Parser, Debug)]
#[command(
    name = "staffboard",
    version,
    about = "Staff directory with today's schedule at a glance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the config file location (takes precedence over STAFFBOARD_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Load staff from this TOML or JSON file (takes precedence over STAFFBOARD_CATALOG)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Treat this weekday as today instead of reading the clock
    #[arg(long)]
    pub day: Option<Weekday>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive directory (default)
    Tui,
    /// Print the directory grouped by subject, optionally filtered by name
    List(ListArgs),
    /// Show one staff member's sessions for today
    Today(TodayArgs),
    /// Print the period timetable
    Periods,
    /// Resolve a time range such as "9:30 - 10:15" to its period
    Period(PeriodArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        env::set_var("STAFFBOARD_CONFIG", path);
    }
    if let Some(path) = &cli.catalog {
        env::set_var("STAFFBOARD_CATALOG", path);
    }

    let loader = ConfigLoader::discover()?;
    loader.paths().ensure_directories()?;
    let paths = loader.paths().clone();
    let command = cli.command.unwrap_or(Commands::Tui);
    let log_file = matches!(command, Commands::Tui).then(|| paths.log_file());
    init_tracing(&cli.log_level, log_file.as_deref())
        .with_context(|| format!("initialising logging at level {}", cli.log_level))?;

    let mut config = loader.load_or_init()?;
    if let Some(day) = cli.day {
        config.schedule.day_override = Some(day);
    }
    let config = Arc::new(config);

    match command {
        Commands::Tui => {
            let board = ScheduleBoard::new(config.load_catalog()?, config.day_resolver());
            let mut app = App::new(config.clone(), board);
            commands::run_tui(&mut app)
        }
        Commands::List(args) => commands::list_staff(&config, args),
        Commands::Today(args) => {
            let day = match args.day {
                Some(day) => DayResolver::fixed(day),
                None => config.day_resolver(),
            };
            commands::show_today(&config, day, args)
        }
        Commands::Periods => commands::list_periods(),
        Commands::Period(args) => commands::resolve_period(args),
    }
}

fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<()> {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_try_init(|| {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
        match log_file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("opening log file {}", path.display()))?;
                fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
            None => {
                fmt()
                    .with_env_filter(env_filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
        Ok::<(), anyhow::Error>(())
    })
    .map(|_| ())
}
