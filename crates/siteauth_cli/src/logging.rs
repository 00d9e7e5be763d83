//! Tracing setup: filtered terminal output on stderr plus a daily log file.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "siteauth.log";

/// Directory the rolling log files are written to.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("siteauth")
        .join("logs")
}

/// Filter directives for terminal output; warn and above unless `--debug`.
fn terminal_directives(debug: bool) -> &'static str {
    if debug {
        "siteauth_core=debug,siteauth_db=debug,siteauth=debug,sqlx=warn,info"
    } else {
        "siteauth_core=warn,siteauth_db=warn,siteauth=warn,warn"
    }
}

const FILE_DIRECTIVES: &str = "siteauth_core=debug,siteauth_db=debug,siteauth=debug,sqlx=warn,info";

/// Install the global subscriber. `RUST_LOG`, when set, replaces the
/// terminal filter. Keep the returned guard alive until exit so buffered
/// file lines are flushed.
pub fn init(debug: bool) -> WorkerGuard {
    let dir = log_dir();
    std::fs::create_dir_all(&dir).ok();

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, LOG_FILE_NAME));

    let terminal_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(terminal_directives(debug)));

    let terminal_layer = if debug {
        fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_timer(fmt::time::LocalTime::rfc_3339())
            .with_writer(std::io::stderr)
            .pretty()
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .boxed()
    };

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_timer(fmt::time::LocalTime::rfc_3339())
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(terminal_layer.with_filter(terminal_filter))
        .with(file_layer.with_filter(EnvFilter::new(FILE_DIRECTIVES)))
        .init();

    tracing::debug!("Logging to {}", dir.join(LOG_FILE_NAME).display());
    guard
}
