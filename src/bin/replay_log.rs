//! Replays a saved action log on a fresh engine
//!
//! Reads the JSON log written by the shell and prints the resulting layout,
//! the arrival value at the end cell and the run counters.

use std::env;
use std::path::Path;
use std::process;
use tracing::error;
use wavefront::action_log::ActionLog;
use wavefront::config::Config;
use wavefront::{logging, PathfinderEngine};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <action_log.json>", args[0]);
        eprintln!("Replays an action log on a fresh engine and prints the final grid");
        process::exit(1);
    }

    let (config, source) = Config::load();
    logging::init(&config.logging.filter);
    source.report();

    if let Err(e) = run(&config, Path::new(&args[1])) {
        error!(error = %e, "replay failed");
        process::exit(1);
    }
}

fn run(config: &Config, path: &Path) -> wavefront::Result<()> {
    let log = ActionLog::load_from_file(path)?;
    let mut engine = PathfinderEngine::from_config(config)?;
    let applied = log.replay(&mut engine);

    println!("=== Replay: {} ===", path.display());
    println!("{}", log.summary());
    println!();
    print!("{}", engine.grid().to_layout_text());
    println!();

    let end = engine.end_coord();
    println!("Pattern: {}", engine.pattern_name().unwrap_or("(pasted)"));
    println!("Connectivity: {}", engine.connectivity());
    println!("Applied actions: {} of {}", applied, log.len());
    println!("Steps: {}", engine.step_count());
    println!("Ended: {}", engine.has_ended());
    println!("End {} value: {}", end, engine.cell_value(end.row, end.col)?);
    println!("Reached cells: {}", engine.grid().reached_count());

    Ok(())
}
