//! Tracing configuration and log routing.
//!
//! Every event is printed to stdout in compact form and appended, without ANSI colours, to the
//! log file named by [`Config::log_file`](crate::config::Config::log_file). File writes go
//! through a non-blocking worker whose guard lives for the rest of the process.
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber, mirroring logs into `log_file`.
///
/// Respects `RUST_LOG` for filtering (defaults to `info`). When the file cannot be opened the
/// service keeps running with stdout logging only.
pub fn init_tracing(log_file: &Path) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();

    let file_layer = match open_log_file(log_file) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_ansi(false)
                    .compact(),
            )
        }
        Err(err) => {
            eprintln!("Failed to open log file {}: {err}", log_file.display());
            None
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}

/// Open `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::open_log_file;
    use std::io::Write;

    #[test]
    fn creates_parent_directories_and_appends() {
        let dir = std::env::temp_dir().join(format!("student-api-log-{}", std::process::id()));
        let path = dir.join("nested").join("service.log");

        writeln!(open_log_file(&path).expect("first open"), "one").expect("write");
        writeln!(open_log_file(&path).expect("second open"), "two").expect("write");

        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "one\ntwo\n");
        std::fs::remove_dir_all(&dir).expect("cleanup");
    }
}
