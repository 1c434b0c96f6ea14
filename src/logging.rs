use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};

/// Installs the global subscriber. Logs go to stdout, or to a daily rolling
/// file under `LOG_DIR` when one is given. The returned guard flushes the
/// background writer on drop and has to live as long as the process.
pub fn init_logging(config: &LogConfig) -> WorkerGuard {
    let log_dir = config.dir.as_deref();
    let (writer, guard) = match log_dir {
        Some(dir) => tracing_appender::non_blocking(rolling::daily(dir, "formlink.log")),
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_ansi(log_dir.is_none());

    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }

    guard
}
