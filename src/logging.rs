//! Tracing subscriber setup for the `graphsim` binary.

use tracing_subscriber::{fmt, EnvFilter};

use crate::types::{Result, SimError};

/// Installs a global `fmt` subscriber filtered by `level`.
///
/// `level` accepts any `EnvFilter` directive, e.g. `info` or
/// `graphsim::programs=debug,warn`. Output goes to stderr so stdout stays
/// reserved for results.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| SimError::InvalidArgument(format!("invalid log level: {e}")))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| SimError::InvalidArgument("logging already initialized".into()))
}
