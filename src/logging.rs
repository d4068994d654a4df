use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize tracing/logging.
///
/// Logs go to stderr so stdout stays reserved for prices and CSV output.
/// `RUST_LOG` overrides the default `warn` level. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
