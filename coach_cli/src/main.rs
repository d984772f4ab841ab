mod screens;
mod shell;

use clap::{Parser, Subcommand};
use coach_core::*;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "Workout tracker and trainer dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Start in the client or trainer view
    #[arg(long, global = true)]
    role: Option<Role>,

    /// Start with no sample data
    #[arg(long, global = true)]
    empty: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session reading commands from stdin (default)
    Shell,

    /// Print today's workout and exit
    Summary {
        /// Dump the whole store as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        coach_core::logging::init_with_level("debug");
    } else {
        coach_core::logging::init();
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let today = chrono::Local::now().date_naive();
    let store = if cli.empty || !config.session.seed_sample_data {
        WorkoutStore::new()
    } else {
        WorkoutStore::with_sample_data(today)
    };
    let role = cli.role.unwrap_or(config.session.role);

    match cli.command {
        Some(Commands::Summary { json }) => cmd_summary(&store, &config, json),
        Some(Commands::Shell) | None => cmd_shell(store, config, role, today),
    }
}

fn cmd_shell(
    store: WorkoutStore,
    config: Config,
    role: Role,
    today: chrono::NaiveDate,
) -> Result<()> {
    tracing::info!("Starting shell as {}", role);
    let mut session = shell::Session::new(store, config, role, today);
    session.run(io::stdin().lock())
}

fn cmd_summary(store: &WorkoutStore, config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(store)?);
        return Ok(());
    }

    screens::overview(store, &config.display.weight_unit);
    Ok(())
}
