use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging for the process. The audit trail written
/// by [`crate::audit`] is separate and has its own fixed line format.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("banks_etl=info".parse().unwrap()))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();
}
