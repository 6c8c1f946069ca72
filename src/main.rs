//! `centipede`: play in the current terminal.
//!
//! Controls: `a`/`d`/`w`/`s` or the arrow keys move, space shoots, `q`
//! or `Esc` quits.
//!
//! Configuration comes from `CENTIPEDE_*` environment variables, read
//! after loading `.env` if present. Logs go to `CENTIPEDE_LOG_FILE` (off
//! when unset) with the level set by `RUST_LOG`; set
//! `CENTIPEDE_LOG_FORMAT=json` for JSON lines.

use centipede::{Engine, EngineConfig, TerminalKeys, TerminalSurface};
use crossterm::{cursor, execute, terminal};
use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;

fn init_tracing() -> io::Result<()> {
    let Ok(path) = std::env::var("CENTIPEDE_LOG_FILE") else {
        return Ok(());
    };
    let writer = Mutex::new(File::create(path)?);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("CENTIPEDE_LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_thread_names(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_thread_names(true)
            .with_ansi(false)
            .compact()
            .init();
    }
    Ok(())
}

/// Log panics and give the terminal back before the default hook prints.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        default_hook(info);
    }));
}

fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    if let Err(err) = init_tracing() {
        eprintln!("centipede: cannot open log file: {err}");
        return ExitCode::FAILURE;
    }
    if let Err(err) = dotenv {
        if !err.not_found() {
            tracing::warn!(error = %err, "ignoring malformed .env");
        }
    }
    install_panic_hook();

    let config = EngineConfig::from_env();
    tracing::debug!(?config, "configuration loaded");

    let result = Engine::new(TerminalSurface::new(), TerminalKeys::new(), config).and_then(Engine::run);
    match result {
        Ok(report) => {
            tracing::info!(
                shots = report.projectiles_spawned,
                outstanding = report.projectiles_outstanding,
                "exited cleanly"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "game failed");
            eprintln!("centipede: {err}");
            ExitCode::FAILURE
        }
    }
}
