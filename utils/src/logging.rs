//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

impl LogFormat {
    /// Parse a config value; anything other than `"json"` is human-readable.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Human
        }
    }
}

/// Initialize the tracing subscriber with sensible defaults.
///
/// Respects the `RUST_LOG` environment variable for filtering.
pub fn init_tracing() {
    init_tracing_with("info", LogFormat::Human);
}

/// Initialize tracing with a fallback level used when `RUST_LOG` is unset.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing_with(default_level: &str, format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Human => builder.try_init().is_ok(),
    };
    if installed {
        tracing::debug!(default_level, ?format, "tracing initialized");
    }
    installed
}
