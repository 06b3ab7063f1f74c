//! Terminal runner.
//!
//! Samples a monotonic clock once per tick, folds key events into an input
//! frame, advances the session and redraws.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use tick_tetris::core::{Clock, GameSession, MonotonicClock, SessionConfig, SessionSnapshot};
use tick_tetris::input::{is_restart, should_quit, KeyTracker};
use tick_tetris::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use tick_tetris::types::{Seconds, SpawnPolicy};

#[derive(Debug, Parser)]
#[command(name = "tick-tetris", about = "Falling-block puzzle in the terminal")]
struct Cli {
    #[arg(long, help = "JSON session config; missing fields use defaults")]
    config: Option<PathBuf>,

    #[arg(long, help = "Seed for the piece generator")]
    seed: Option<u32>,

    #[arg(long, value_parser = parse_policy, help = "Spawn policy: bag or uniform")]
    policy: Option<SpawnPolicy>,

    #[arg(long, default_value = "16", help = "Milliseconds between scheduler ticks")]
    tick_ms: u64,

    #[arg(long, help = "Write logs to this file (the terminal is in raw mode while playing)")]
    log_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v = DEBUG, -vv = TRACE)"
    )]
    verbose: u8,

    #[arg(long, help = "Print the effective config as JSON and exit")]
    print_config: bool,
}

fn parse_policy(s: &str) -> Result<SpawnPolicy, String> {
    SpawnPolicy::from_str(s).ok_or_else(|| format!("unknown spawn policy '{s}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.verbose)?;

    let config = load_config(&cli)?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let clock = MonotonicClock::new();
    let session = GameSession::new(config, clock.now()).context("invalid session config")?;
    info!(seed = session.config().seed, "starting session");

    let tick = Duration::from_millis(cli.tick_ms.max(1)).as_secs_f64();

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let keys = if term.reports_key_release() {
        KeyTracker::new().with_release_events()
    } else {
        KeyTracker::for_timing(&session.config().timing)
    };
    info!(release_timeout = ?keys.release_timeout(), "input ready");
    let result = run(&mut term, &clock, session, keys, tick);
    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: Option<&Path>, verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let file_layer = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    tracing_subscriber::registry()
        .with(file_layer)
        .with(level)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => SessionConfig {
            seed: time_seed(),
            ..SessionConfig::default()
        },
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(policy) = cli.policy {
        config.spawn_policy = policy;
    }
    Ok(config)
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(
    term: &mut TerminalRenderer,
    clock: &MonotonicClock,
    mut session: GameSession,
    mut keys: KeyTracker,
    tick: Seconds,
) -> Result<()> {
    let view = BoardView::default();
    let mut frame = FrameBuffer::new(0, 0);
    let mut snapshot = SessionSnapshot::default();
    let mut next_tick = clock.now();

    loop {
        session.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut frame);
        term.present(&mut frame)?;

        let wait = (next_tick - clock.now()).max(0.0);
        if event::poll(Duration::from_secs_f64(wait))? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_restart(key) {
                        if key.kind == KeyEventKind::Press {
                            session.restart(clock.now());
                            keys.release_all();
                        }
                    } else {
                        keys.handle_key_event(key, clock.now());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = clock.now();
        if now >= next_tick {
            let input = keys.frame(now);
            session.tick(now, &input);
            next_tick = now + tick;
        }
    }
}
