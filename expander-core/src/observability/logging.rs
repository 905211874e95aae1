use crate::settings::{LogFormat, LoggingSettings};
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_INIT: OnceLock<()> = OnceLock::new();

/// Installs a global subscriber once; later calls are no-ops.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn setup_logging(settings: &LoggingSettings) {
    LOG_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.level));

        let registry = tracing_subscriber::registry().with(filter);

        let installed = match settings.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_file(settings.file_line)
                        .with_line_number(settings.file_line),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(settings.file_line)
                        .with_line_number(settings.file_line),
                )
                .try_init(),
        };

        if let Err(err) = installed {
            tracing::debug!(error = %err, "global subscriber already set, leaving it in place");
        }
    });
}
