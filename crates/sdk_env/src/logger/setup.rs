//!
//! Setup logging subsystem.
//!

use error_stack::ResultExt;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::config::{self, EnvError};

/// Keeps the non-blocking log writers flushing until dropped.
#[derive(Debug)]
pub struct LogGuard {
    _log_guards: Vec<WorkerGuard>,
}

///
/// Setup logging sub-system specifying.
/// Expects config and list of names of crates to watch.
///
/// Console output of the watched crates is filtered by the configured level;
/// everything else is limited to warnings. The `RUST_LOG` environment variable
/// applies on top of that.
///
pub fn setup<Str: AsRef<str>>(
    conf: &config::Log,
    service_name: &str,
    crates_to_watch: impl IntoIterator<Item = Str>,
) -> error_stack::Result<LogGuard, EnvError> {
    let mut guards = Vec::new();

    let console_layer = if conf.console.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let level = conf.console.level.into_level();
        let mut console_filter = filter::Targets::new().with_default(LevelFilter::WARN);
        for acrate in crates_to_watch {
            console_filter = console_filter.with_target(acrate.as_ref(), level);
        }

        let logging_layer = match conf.console.log_format {
            config::LogFormat::Default => fmt::layer()
                .pretty()
                .with_writer(console_writer)
                .with_filter(console_filter)
                .boxed(),
            config::LogFormat::Json => fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_writer(console_writer)
                .with_filter(console_filter)
                .boxed(),
        };
        Some(logging_layer)
    } else {
        None
    };

    // Use 'RUST_LOG' environment variable will override the config settings
    tracing_subscriber::registry()
        .with(console_layer)
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::TRACE.into())
                .from_env_lossy(),
        )
        .try_init()
        .change_context(EnvError::LoggerSetup)
        .attach_printable_lazy(|| format!("Unable to install the logger of {service_name}"))?;

    tracing::debug!(service = service_name, "logger initialized");

    // Returning the WorkerGuard for logs to be printed until it is dropped
    Ok(LogGuard {
        _log_guards: guards,
    })
}
