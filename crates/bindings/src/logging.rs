//! Diagnostic logging.
//!
//! The bridge and the simulator emit `tracing` events. Harnesses that load the
//! bridge as a shared library have no subscriber of their own, so
//! [`init`] installs a formatter writing to stderr, filtered by the
//! `SIMX_LOG` environment variable (`warn` when unset).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives, e.g. `simx_core=trace`.
pub const LOG_ENV: &str = "SIMX_LOG";

/// Filter used when `SIMX_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber.
///
/// Safe to call any number of times; only the first call with no subscriber
/// already installed has an effect.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
