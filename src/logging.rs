// Conditional logging macros - only active in debug builds

use crate::solver::{FilterObserver, RowConstraint};
use std::fs::{self, File};
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const APP_DIR: &str = "wordle-helper";
const LOG_FILE_NAME: &str = "wordle-helper.log";

/// Default log destination for the grid UI: `<cache_dir>/wordle-helper/wordle-helper.log`.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE_NAME))
}

/// Installs env_logger with a local timestamp on every record.
///
/// `RUST_LOG` wins over the default level. With a `log_file` the records are
/// appended there instead of stderr.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> io::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::options().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // A logger may already be installed (tests, embedding); keep it.
    let _ = builder.try_init();
    Ok(())
}

/// Forwards filter diagnostics to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl FilterObserver for LogObserver {
    fn row_constraint(&mut self, row: usize, constraint: &RowConstraint) {
        debug_log!(
            "row {}: pattern {} counts {:?}",
            row + 1,
            constraint.pattern(),
            constraint.counts()
        );
    }

    fn row_applied(&mut self, row: usize, before: usize, after: usize) {
        debug_log!("row {}: {} -> {} candidates", row + 1, before, after);
    }
}
