mod menu;
mod render;

use clap::Parser;
use pillpilot_core::*;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pillpilot")]
#[command(about = "Interactive medication tracker", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override both store and schedule capacity
    #[arg(long)]
    capacity: Option<usize>,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Number medicines 1, 2, 3, ... instead of using the clock
    #[arg(long)]
    sequential_ids: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(capacity) = cli.capacity {
        config.store.capacity = capacity;
        config.queue.capacity = capacity;
    }

    // Initialize logging
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    pillpilot_core::logging::init_with_level(level);

    let ids: Box<dyn IdGenerator> = if cli.sequential_ids {
        Box::new(SequentialIdGenerator::default())
    } else {
        Box::new(ClockIdGenerator)
    };
    let tracker = MedicationTracker::with_id_generator(&config, ids)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::Session::new(tracker, stdin.lock(), stdout.lock()).run()
}
