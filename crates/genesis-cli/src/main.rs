//! Headless command-line driver for the Genesis NPC simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "genesis",
    about = "Genesis — a headless NPC population simulator",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation for a number of frames and report the result
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: u64,

        /// Seconds per frame (default: 1 / tick rate)
        #[arg(long)]
        dt: Option<f64>,

        /// RNG seed for deterministic simulation
        #[arg(short, long)]
        seed: Option<u64>,

        /// Size of the initial population
        #[arg(short, long)]
        population: Option<usize>,

        /// Game-time multiplier (clamped to 0..=10)
        #[arg(long)]
        time_scale: Option<f64>,

        /// JSON config file (see `genesis config`)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep the world clock paused; NPCs still act
        #[arg(long)]
        paused: bool,

        /// Print a JSON snapshot instead of the summary
        #[arg(long)]
        json: bool,

        /// Show all events (not just the summary)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the default configuration as JSON
    Config,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            frames,
            dt,
            seed,
            population,
            time_scale,
            config,
            paused,
            json,
            verbose,
        } => commands::run::run(&commands::run::RunArgs {
            frames,
            dt,
            seed,
            population,
            time_scale,
            config,
            paused,
            json,
            verbose,
        }),
        Commands::Config => commands::config::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
