// Logging setup for the binary. The library only emits `tracing` events;
// installing a subscriber is left to the entry point.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `rmcloud_cli=debug`.
pub const LOG_ENV: &str = "RMCLOUD_LOG";

/// Install a stderr subscriber. Defaults to `info` when `RMCLOUD_LOG` is
/// unset or invalid. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
