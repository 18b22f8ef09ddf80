//! Logging setup for the `lpis` CLI.
//!
//! One entry point: [`init`] installs the global subscriber, writing
//! to an append-only log file under the XDG state dir when it can be
//! opened and to stderr otherwise. The choice is internal so callers
//! never have to branch on a failed init.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVES: &str = "info,lpis_core=debug,lpis_cli=debug";

/// Resolves the log file path, creating parent directories as needed.
/// Typically `~/.local/state/lpis/lpis.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("lpis")?;
    Ok(xdg_dirs.place_state_file("lpis.log")?)
}

fn open_log_file() -> Result<File> {
    let path = log_file_path()?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Installs the global tracing subscriber.
///
/// Prefers the state-dir log file so command output stays clean; when
/// the state dir is unavailable (read-only home, no `$HOME`), log
/// lines go to stderr instead of aborting the CLI.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let writer = match open_log_file() {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
}
