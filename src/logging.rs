use std::path::Path;

use anyhow::Context;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Old files kept next to the current one.
const KEPT_BACKUPS: usize = 3;

/// `app.<date>.log` in `dir`, rotated daily.
pub fn log_file_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("app")
        .filename_suffix("log")
        .max_log_files(KEPT_BACKUPS + 1)
        .build(dir)
}

/// Console logging, plus the rotating file log when `LOG_DIR` is set.
/// The returned guard flushes the file writer and must outlive the server.
pub fn init_tracing(config: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "songbook=debug,tower_http=info".into());

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = log_file_appender(dir)
                .with_context(|| format!("opening log directory {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}
