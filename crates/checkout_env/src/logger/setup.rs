//!
//! Setup logging subsystem.
//!

use std::path::PathBuf;

use error_stack::ResultExt;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::config::{self, LogFormat};

/// Keeps the non-blocking log writers alive. Logs are flushed when it is dropped.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// A global subscriber was already installed.
    #[error("Failed to install the global tracing subscriber")]
    SubscriberInit,
}

///
/// Setup logging sub-system specifying.
/// Expects config and list of names of crates to watch.
///
pub fn setup<Str: AsRef<str>>(
    conf: &config::Log,
    service_name: &str,
    crates_to_watch: impl IntoIterator<Item = Str>,
) -> error_stack::Result<TelemetryGuard, SetupError> {
    let mut guards = Vec::new();

    let file_layer = if conf.file.enabled {
        let mut path: PathBuf = crate::env::workspace_path();
        path.push(&conf.file.path);
        let file_appender = tracing_appender::rolling::hourly(&path, &conf.file.file_name);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);

        let file_filter = filter::Targets::new().with_default(conf.file.level.into_level());
        Some(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(file_writer)
                .with_filter(file_filter),
        )
    } else {
        None
    };

    let console_layer = if conf.console.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let level = conf.console.level.into_level();
        let mut console_filter = filter::Targets::new().with_default(tracing::Level::WARN);
        for acrate in crates_to_watch {
            console_filter = console_filter.with_target(acrate.as_ref().to_owned(), level);
        }

        let layer = match conf.console.log_format {
            LogFormat::Default => fmt::layer()
                .with_timer(fmt::time::SystemTime)
                .with_span_events(fmt::format::FmtSpan::CLOSE)
                .pretty()
                .with_writer(console_writer)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(console_writer)
                .boxed(),
        };
        Some(layer.with_filter(console_filter))
    } else {
        None
    };

    // Use 'RUST_LOG' environment variable will override the config settings
    let env_filter = match conf.console.filtering_directive.as_deref() {
        Some(directive) => EnvFilter::builder()
            .with_default_directive(tracing::Level::TRACE.into())
            .parse_lossy(directive),
        None => EnvFilter::builder()
            .with_default_directive(tracing::Level::TRACE.into())
            .from_env_lossy(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|_| error_stack::report!(SetupError::SubscriberInit))
        .attach_printable_lazy(|| format!("service: {service_name}"))?;

    tracing::debug!(service = service_name, "logger initialised");

    // Returning the WorkerGuard for logs to be printed until it is dropped
    Ok(TelemetryGuard {
        _log_guards: guards,
    })
}
