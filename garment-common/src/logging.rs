//! Tracing initialisation shared by garment binaries
//!
//! The subscriber is installed before configuration is loaded so that config
//! resolution messages are not lost. Its filter starts at `RUST_LOG` or the
//! default level and is swapped for the configured level afterwards.

use crate::config::LoggingConfig;
use crate::{Error, Result};
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Build the log filter: `RUST_LOG` wins over the configured level
pub fn build_env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

/// Handle to the live log filter of the installed subscriber
pub struct LogFilterHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogFilterHandle {
    /// Switch to the configured level (`RUST_LOG` still wins)
    pub fn apply(&self, logging: &LoggingConfig) -> Result<()> {
        self.handle
            .reload(build_env_filter(logging))
            .map_err(|e| Error::Internal(format!("Failed to apply log level: {}", e)))
    }

    /// Directives of the active filter
    pub fn current(&self) -> Option<String> {
        self.handle.with_current(|filter| filter.to_string()).ok()
    }
}

fn reloadable_subscriber(
    initial: EnvFilter,
) -> (impl Subscriber + Send + Sync + 'static, LogFilterHandle) {
    let (filter, handle) = reload::Layer::new(initial);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));
    (subscriber, LogFilterHandle { handle })
}

/// Install the global fmt subscriber on stderr
///
/// Call first thing in `main`, then [`LogFilterHandle::apply`] once the
/// configuration is loaded.
pub fn init_tracing() -> Result<LogFilterHandle> {
    let (subscriber, handle) = reloadable_subscriber(build_env_filter(&LoggingConfig::default()));
    subscriber
        .try_init()
        .map_err(|e| Error::Internal(format!("Failed to initialize tracing: {}", e)))?;
    Ok(handle)
}
