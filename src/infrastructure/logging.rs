use anyhow::{Context, Result};
use env_logger::{Builder, Target, WriteStyle};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "rangepicker.log";

/// Builds an `env_logger` that appends to `<dir>/rangepicker.log`.
///
/// `filters` uses the `RUST_LOG` syntax (`info`, `rangepicker=debug`, ...).
/// The terminal belongs to the UI, so nothing is written to stderr.
pub fn file_logger(dir: &Path, filters: &str) -> Result<(env_logger::Logger, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let logger = Builder::new()
        .parse_filters(filters)
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format_timestamp_secs()
        .build();
    Ok((logger, path))
}

pub fn init_logging(dir: &Path, filters: &str) -> Result<PathBuf> {
    let (logger, path) = file_logger(dir, filters)?;
    log::set_max_level(logger.filter());
    log::set_boxed_logger(Box::new(logger)).context("a logger is already installed")?;
    log::debug!("logging to {}", path.display());
    Ok(path)
}
