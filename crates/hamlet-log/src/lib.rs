//! Logging setup for hamlet binaries.
//!
//! Library crates only emit `tracing` events (or `log` records, which are
//! bridged). This crate installs the subscriber: a console layer, optionally a
//! JSON file layer, and an `EnvFilter` driven by `RUST_LOG` or the config.

use std::fs::File;
use std::path::{Path, PathBuf};

use hamlet_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file inside the log directory.
pub const LOG_FILE: &str = "hamlet.log";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.debug.log_level`. When `log_dir` is given and
/// `config.debug.log_to_file` is set, events are also written as JSON lines to
/// [`LOG_FILE`] in that directory. Failing to create the file only disables
/// the file layer.
///
/// # Panics
///
/// If a global subscriber is already installed.
pub fn init_logging(log_dir: Option<&Path>, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let to_file = config.is_some_and(|c| c.debug.log_to_file);
    if to_file
        && let Some(log_dir) = log_dir
        && let Some(log_file) = create_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::debug!("writing JSON log to {}", log_dir.join(LOG_FILE).display());
        return;
    }

    subscriber.init();
}

/// The filter directive derived from the config, falling back to
/// [`DEFAULT_FILTER`] when it is missing or blank.
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Path the JSON log is written to for `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE)
}

fn create_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_file_path(log_dir)).ok()
}
