//! Log setup: stderr plus a per-seed log file.
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber.
///
/// `RUST_LOG` controls filtering and defaults to `info`. Keep the returned
/// guard alive until exit or buffered file output is lost.
pub fn setup_logging(log_dir: Option<&Path>, seed: u64) -> Result<(WorkerGuard, PathBuf)> {
    let run_dir = log_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(default_log_dir)
        .join(format!("seed_{seed:016x}"));
    std::fs::create_dir_all(&run_dir)?;

    let file_appender = tracing_appender::rolling::never(&run_dir, "sim.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    let log_file = run_dir.join("sim.log");
    tracing::info!("Log file: {}", log_file.display());
    Ok((guard, log_file))
}

/// Platform cache directory for logs.
///
/// - macOS: `~/Library/Caches/upgrade-sim/logs`
/// - Linux: `~/.cache/upgrade-sim/logs` (or `$XDG_CACHE_HOME/upgrade-sim/logs`)
/// - Windows: `%LOCALAPPDATA%\upgrade-sim\cache\logs`
/// - Fallback: `/tmp/upgrade-sim/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "upgrade-sim")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/upgrade-sim"))
        .join("logs")
}
