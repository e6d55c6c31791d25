use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use frog_snake::config::{GameConfig, default_log_path};
use frog_snake::driver::GameDriver;
use frog_snake::error::GameError;
use frog_snake::game::GameEngine;
use frog_snake::input::{GameInput, InputHandler};
use frog_snake::logging::init_file_logger;
use frog_snake::renderer::{TerminalView, required_terminal_size};
use frog_snake::terminal_runtime::{TerminalSession, cleanup_terminal_best_effort};
use log::{error, info};
use simplelog::LevelFilter;

/// Longest the loop blocks on input before checking the tick timer.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Steer the snake, eat the frogs, avoid walls and yourself.")]
struct Cli {
    /// JSON config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Starting tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Terminal columns per cell (1 or 2).
    #[arg(long)]
    cell_size: Option<u16>,

    /// Log file path.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable the log file.
    #[arg(long, conflicts_with = "log_file")]
    no_log: bool,

    /// Log debug records (rejected turns, food placement).
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.no_log {
        let path = cli.log_file.clone().unwrap_or_else(default_log_path);
        let level = if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        if let Err(error) = init_file_logger(&path, level) {
            eprintln!("Logging disabled: {}: {error}", path.display());
        }
    }

    install_panic_hook();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("frog-snake: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), GameError> {
    let config = resolve_config(cli)?;
    let engine = GameEngine::new(config)?;
    let needed = required_terminal_size(engine.grid(), engine.config().cell_size);
    let view = TerminalView::new(engine.grid(), engine.config().cell_size);

    let mut session = TerminalSession::enter(needed)?;
    let mut input = InputHandler::new();
    let mut driver = GameDriver::start(engine, view, Instant::now());
    info!("frog-snake running");

    loop {
        if driver.view_mut().take_dirty() {
            session
                .terminal_mut()
                .draw(|frame| driver.view().draw(frame))?;
        }

        let timeout = driver
            .scheduler()
            .time_until_next(Instant::now())
            .map_or(MAX_POLL_INTERVAL, |wait| wait.min(MAX_POLL_INTERVAL));

        match input.poll_input(timeout)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Direction(direction)) => {
                driver.handle_direction(direction, Instant::now())?;
            }
            None => {}
        }

        driver.on_timer(Instant::now())?;
    }

    info!(
        "quit with score {} after {} ticks",
        driver.engine().session().score,
        driver.engine().tick_count()
    );
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, GameError> {
    let config = GameConfig::load_or_default(cli.config.as_deref())?
        .with_overrides(cli.grid_size, cli.tick_ms, cli.cell_size)?;
    Ok(config)
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
