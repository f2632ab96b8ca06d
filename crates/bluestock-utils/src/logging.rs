//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter used when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVE: &str = "warn,bluestock_core=info,bluestock_cli=info";

/// Initialize tracing subscriber with default configuration
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_DIRECTIVE);
}

/// Initialize tracing, falling back to `default_directive` when `RUST_LOG` is unset.
///
/// Output goes to stderr so it never interleaves with the rendered view on stdout.
pub fn init_tracing_with_default(default_directive: &str) {
    tracing_subscriber::registry()
        .with(build_filter(default_directive))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}
