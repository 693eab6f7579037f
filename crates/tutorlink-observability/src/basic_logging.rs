use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tutorlink_config::{LogFormat, LoggingConfig};

/// Keeps the background file writer alive. Hold it until the process exits
/// or buffered lines are lost.
#[must_use = "dropping the guard stops the log file writer"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Build the filter: `RUST_LOG` wins when set, otherwise the configured level
/// applies to the tutorlink crates and noisy dependencies are held at warn.
pub fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tutorlink={level},tutorlink_session={level},tutorlink_core={level},reqwest=warn,hyper=warn,hyper_util=warn,rustls=warn"
        ))
    })
}

/// Initialize console logging, plus a daily-rolling file when `log_dir` is
/// configured.
///
/// - **Log Level**: `LOG_LEVEL` (default "info"), overridden by `RUST_LOG`
/// - **Format**: compact with ANSI colors, or JSON lines when `LOG_FORMAT=json`
/// - **Output**: stderr, so command output on stdout stays clean
pub fn init_basic_console_logging(config: &LoggingConfig) -> LoggingGuard {
    let console_layer = match config.format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .with_filter(build_env_filter(&config.level))
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .with_filter(build_env_filter(&config.level))
            .boxed(),
    };

    let (file_layer, file_guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "tutorlink.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(build_env_filter(&config.level))
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    LoggingGuard { _file: file_guard }
}
