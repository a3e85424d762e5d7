// src/telemetry.rs
// =============================================================================
// Logging setup.
//
// Everything the crawler reports goes through `tracing`. This file installs a
// formatting subscriber once, at startup:
// - default level is `info` for this crate and `warn` for dependencies
// - `--verbose` raises this crate to `debug`
// - RUST_LOG, when set, wins over both
// =============================================================================

use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "warn,site_sentry=debug"
    } else {
        "warn,site_sentry=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // a subscriber may already be installed
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
