//! Log output setup.
//!
//! Logs go to stderr by default so they never interleave with the chat
//! transcript on stdout. A log file, when configured, is appended to instead.
//! `RUST_LOG` overrides the configured level.

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Build the level filter, preferring `RUST_LOG` when it is set.
///
/// # Errors
///
/// Returns an error if `level` is not a valid filter directive.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| Error::Logging(format!("invalid log level '{level}': {e}")))
}

/// Create the log writer: the given file (appending), or stderr.
///
/// # Errors
///
/// Returns an error if the log file or its directory cannot be created.
pub fn make_writer(log_file: Option<&Path>) -> Result<BoxMakeWriter> {
    let Some(path) = log_file else {
        return Ok(BoxMakeWriter::new(std::io::stderr));
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Install the global log subscriber.
///
/// Should be called once at startup, before anything logs.
///
/// # Errors
///
/// Returns an error if the filter or writer cannot be built, or a global
/// subscriber is already installed.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = build_filter(level)?;
    let writer = make_writer(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_filter_accepts_levels() {
        for level in crate::config::LOG_LEVELS {
            assert!(build_filter(level).is_ok(), "level {level} rejected");
        }
    }

    #[test]
    fn test_file_writer_appends_log_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("taskchat.log");

        let subscriber = tracing_subscriber::fmt()
            .with_writer(make_writer(Some(&path)).unwrap())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(task_id = 3, "task created");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("task created"));
        assert!(content.contains("task_id=3"));
    }

    #[test]
    fn test_stderr_writer_without_file() {
        assert!(make_writer(None).is_ok());
    }
}
