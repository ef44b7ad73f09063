use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

/// Filter directives, e.g. `SWITEX_LOG=switex=trace`.
pub const LOG_ENV: &str = "SWITEX_LOG";

static TRACING_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Installs the global subscriber: stderr always, plus an append-only file
/// when `log_file` is set. A second call keeps the first subscriber.
pub fn init_tracing(log_file: Option<&Path>, verbose: bool) -> Result<(), AppError> {
    let default_filter = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_target(false);

    let file_layer = match log_file {
        Some(path) => {
            let (dir, name) = split_log_path(path);
            std::fs::create_dir_all(&dir).map_err(|source| AppError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            // The appender panics on an unopenable file, so open it once first.
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| AppError::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;

            let file_appender = tracing_appender::rolling::never(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            store_tracing_guard(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_level(true)
                    .with_target(true),
            )
        }
        None => None,
    };

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!(log_file = ?log_file, "tracing initialized");
    }
    Ok(())
}

fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let name = path
        .file_name()
        .map_or_else(|| PathBuf::from("switex.log"), PathBuf::from);
    (dir, name)
}

fn store_tracing_guard(guard: WorkerGuard) {
    if let Ok(mut slot) = TRACING_GUARD.lock() {
        *slot = Some(guard);
    }
}

/// Flushes and drops the file writer; call before the process exits.
pub fn flush_tracing() {
    if let Ok(mut slot) = TRACING_GUARD.lock() {
        slot.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_is_split_into_dir_and_name() {
        let (dir, name) = split_log_path(Path::new("/var/log/switex.log"));
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, PathBuf::from("switex.log"));

        let (dir, name) = split_log_path(Path::new("out.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, PathBuf::from("out.log"));
    }
}
