//! Tracing setup shared by the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` wins, otherwise the configured level for this
/// crate plus `extra` directives
pub fn env_filter(config: &LoggingConfig, extra: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = format!("scoreboard={}", config.level);
        if !extra.is_empty() {
            directives.push(',');
            directives.push_str(extra);
        }
        EnvFilter::new(directives)
    })
}

/// Install the global subscriber in `pretty` or `json` format.
///
/// Logs go to stderr so CLI output on stdout stays clean.
pub fn init_tracing(config: &LoggingConfig, extra: &str) {
    let filter = env_filter(config, extra);

    match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
