//! Logger setup shared by the numerical task objects.
//!
//! Levels are given as text ("debug", "info", "warn", "error", "off"/"none"), the
//! same words a task document uses. Console output goes through `TermLogger`, an
//! optional copy goes to a file through `WriteLogger`.
use crate::symbolic::symbolic_errors::CalcError;
use chrono::Local;
use log::warn;
use simplelog::*;
use std::fs::File;
use std::sync::atomic::{AtomicBool, Ordering};

/// Turns a textual level into a filter. `off` and `none` disable logging.
pub fn parse_loglevel(level: &str) -> Result<LevelFilter, CalcError> {
    match level.trim().to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other => Err(CalcError::InvalidTask(format!(
            "loglevel must be debug, info, warn, error, off or none, got '{}'",
            other
        ))),
    }
}

/// log file name stamped with the current date and time
pub fn log_file_name(prefix: &str) -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("{}_{}.txt", prefix, date_and_time)
}

static LOGGER_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Initialize the global logger.
///
/// A logger can be installed once per process. Later calls return `false` and touch
/// nothing, in particular they never create or truncate a log file, so task objects may
/// call this on every `solve`. Returns `true` if this call installed the logger.
pub fn init_logger(level: LevelFilter, log_file: Option<&str>) -> bool {
    if level == LevelFilter::Off {
        return false;
    }
    if LOGGER_INSTALLED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return false;
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    let mut file_error = None;
    if let Some(filename) = log_file {
        match File::create(filename) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(e) => file_error = Some((filename, e)),
        }
    }
    if CombinedLogger::init(loggers).is_err() {
        // some other logger owns the process
        return false;
    }
    if let Some((filename, e)) = file_error {
        warn!("cannot create log file '{}': {}, logging to terminal only", filename, e);
    }
    true
}
