//! File logging module.
//!
//! The terminal belongs to the interface while the application runs, so log records are appended
//! to a file instead of being printed.

use std::{
    fs::{File, OpenOptions},
    io::Write as _,
    path::Path,
    sync::Mutex,
    time::Instant,
};

use color_eyre::eyre::{eyre, Result};
use log::{LevelFilter, Log, Metadata, Record};

/// Logger appending one line per record to a file.
struct FileLogger {
    /// Most verbose level written out.
    level: LevelFilter,
    /// Moment the logger was installed, used for relative timestamps.
    started: Instant,
    /// Destination file.
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{:>8.3}s {:<5} {}] {}",
                self.started.elapsed().as_secs_f64(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Installs a logger appending records up to `level` to the file at `path`.
///
/// # Errors
///
/// This function may return errors if:
/// - The file cannot be opened for appending
/// - A global logger has already been installed
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let logger = FileLogger {
        level,
        started: Instant::now(),
        file: Mutex::new(file),
    };

    log::set_boxed_logger(Box::new(logger)).map_err(|err| eyre!("failed to install logger: {err}"))?;
    log::set_max_level(level);

    Ok(())
}
