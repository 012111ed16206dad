//! Logging utilities

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the default log filter
pub const ENV_LOG_LEVEL: &str = "PEERHABIT_LOG_LEVEL";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `PEERHABIT_LOG_LEVEL`, which defaults to `info`.
/// Calling this more than once is harmless; later calls return `false`.
pub fn init_logging() -> bool {
    let level = std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
