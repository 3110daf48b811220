//! Tracing subscriber setup for the server binary.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Name prefix of the rolling JSON log files
const LOG_FILE_PREFIX: &str = "marketplace.log";

/// Filter used when `RUST_LOG` is unset
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "marketplace=debug,tower_http=debug,info"
    } else {
        "info"
    }
}

/// Installs the global subscriber
///
/// Human-readable output goes to stdout. With a `log_dir`, JSON lines are also
/// written to a daily rolling file; the returned guard must be held until
/// shutdown so buffered lines get flushed.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing(debug: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let stdout_layer = fmt::layer().with_target(debug);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();

    guard
}
