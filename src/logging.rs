//! Logging setup.
//!
//! The interactive TUI logs to a file so the terminal display is left alone;
//! headless runs log to stderr.

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging for TUI mode.
///
/// Location: `~/.local/state/skirmish/skirmish.log` on Linux, or the
/// platform state/config directory elsewhere. The file is truncated on
/// each run.
pub fn init_file_logging() {
    let log_path = log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            return;
        }
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

/// Initializes logging for headless mode.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

pub fn log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("skirmish").join("skirmish.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("skirmish").join("skirmish.log");
    }

    std::env::temp_dir().join("skirmish.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_is_absolute() {
        assert!(log_path().is_absolute());
    }

    #[test]
    fn test_log_path_file_name() {
        assert!(log_path().ends_with("skirmish.log"));
    }
}
