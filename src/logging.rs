use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "etl.log";

/// Initializes the logging system with both console and file output.
///
/// When the log directory cannot be created, only the console layer is installed.
pub fn init_logging() {
    let (file_writer, guard) = match file_writer(Path::new(LOG_DIR)) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };
    let file_layer = file_writer.map(|writer| fmt::layer().json().with_writer(writer));

    // Console output goes to stderr so stdout carries only the run's status lines
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    // Respect RUST_LOG if set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("customer_order_etl=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // Keep the guard alive for the life of the process so logs flush on exit
    std::mem::forget(guard);
}

/// Daily rotated file under `dir`, written off-thread. `None` if `dir` can't be created.
pub fn file_writer(dir: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!(
            "Could not create log directory '{}': {}; file logging disabled",
            dir.display(),
            e
        );
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE);
    Some(tracing_appender::non_blocking(file_appender))
}
