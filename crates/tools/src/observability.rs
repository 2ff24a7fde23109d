//! Tracing setup for the command line tools.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process. `RUST_LOG` wins over `debug`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
