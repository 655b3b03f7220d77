use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;

use crate::utils::file_utils::ensure_dir_exists;

const DEFAULT_FILTER: &str = "video_search_client=info";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where tracing output goes
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Headless commands: plain stderr
    Stderr,
    /// The terminal UI owns the screen, so logs go to `<dir>/client.log`
    File(PathBuf),
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

pub fn init_tracing(target: LogTarget) {
    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(log_dir) => init_file_tracing(&log_dir),
    }
}

fn init_file_tracing(log_dir: &Path) {
    if let Err(err) = ensure_dir_exists(log_dir) {
        eprintln!("{err:#}");
        return;
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "client.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init();
}
