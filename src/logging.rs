//! Logging initialization
//!
//! The terminal belongs to the UI, so by default logs go to
//! `<data_dir>/logs/formwizard.{date}.log`, rotated daily with the last
//! [`MAX_LOG_FILES`] days kept. With file logging disabled they go to
//! stderr.

use crate::config::TuiConfig;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Result of logging initialization
pub struct LoggingHandle {
    /// Flushes buffered logs when dropped; keep alive until exit
    pub _guard: Option<WorkerGuard>,
    /// Path to the log file when logging to a file
    pub log_file_path: Option<PathBuf>,
}

/// Daily log files kept in the logs directory
pub const MAX_LOG_FILES: usize = 7;

const LOG_PREFIX: &str = "formwizard";
const LOG_SUFFIX: &str = "log";

/// Name of the log file written on a given (UTC) day
fn log_filename(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("{LOG_PREFIX}.{}.{LOG_SUFFIX}", now.format("%Y-%m-%d"))
}

/// Remove all but the newest `keep` log files, returning how many went
///
/// Day-stamped names sort chronologically. Other files are left alone.
fn prune_old_logs(logs_dir: &Path, keep: usize) -> std::io::Result<usize> {
    let prefix = format!("{LOG_PREFIX}.");
    let suffix = format!(".{LOG_SUFFIX}");
    let mut logs: Vec<String> = std::fs::read_dir(logs_dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(&prefix) && name.ends_with(&suffix))
        .collect();
    logs.sort();

    let excess = logs.len().saturating_sub(keep);
    for name in &logs[..excess] {
        std::fs::remove_file(logs_dir.join(name))?;
    }
    Ok(excess)
}

/// Daily appender that removes files beyond [`MAX_LOG_FILES`] on rollover
fn file_appender(logs_dir: &Path) -> Result<RollingFileAppender> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(logs_dir)?;
    Ok(appender)
}

/// Initialize the global subscriber from configuration
pub fn init_logging(config: &TuiConfig) -> Result<LoggingHandle> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level()));

    if config.log_to_file() {
        let logs_dir = config.logs_path();
        std::fs::create_dir_all(&logs_dir)?;

        let log_file_path = logs_dir.join(log_filename(chrono::Utc::now()));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(&logs_dir)?);
        // The appender only prunes when the day rolls over
        let pruned = prune_old_logs(&logs_dir, MAX_LOG_FILES);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();

        match pruned {
            Ok(0) => {}
            Ok(count) => tracing::debug!("Removed {count} old log files"),
            Err(err) => tracing::warn!("Failed to prune old log files: {err}"),
        }

        Ok(LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_filename_format() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(log_filename(now), "formwizard.2026-03-09.log");
    }

    #[test]
    fn test_same_day_launches_share_one_file() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        for line in ["first launch\n", "second launch\n"] {
            let mut appender = file_appender(dir.path()).unwrap();
            appender.write_all(line.as_bytes()).unwrap();
            appender.flush().unwrap();
        }

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("formwizard.") && files[0].ends_with(".log"));

        let content = std::fs::read_to_string(dir.path().join(&files[0])).unwrap();
        assert!(content.contains("first launch"));
        assert!(content.contains("second launch"));
    }

    #[test]
    fn test_prune_keeps_newest_logs() {
        let dir = tempfile::TempDir::new().unwrap();
        for day in 1..=9 {
            std::fs::write(dir.path().join(format!("formwizard.2026-03-0{day}.log")), "").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        assert_eq!(prune_old_logs(dir.path(), 7).unwrap(), 2);

        let mut left: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        left.sort();
        assert_eq!(left.len(), 8);
        assert_eq!(left[0], "formwizard.2026-03-03.log");
        assert!(left.contains(&"formwizard.2026-03-09.log".to_string()));
        assert!(left.contains(&"notes.txt".to_string()));
    }

    #[test]
    fn test_prune_under_limit_removes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("formwizard.2026-03-01.log"), "").unwrap();

        assert_eq!(prune_old_logs(dir.path(), MAX_LOG_FILES).unwrap(), 0);
        assert!(dir.path().join("formwizard.2026-03-01.log").exists());
    }

    #[test]
    fn test_file_logging_enabled_by_default() {
        // init_logging installs a global subscriber, so only the
        // configuration it branches on is checked here
        assert!(TuiConfig::default().log_to_file());
    }
}
