//! Diagnostic tracing for the runner itself.
//!
//! Operator output (`> path` lines, unrecognized-line and spawn diagnostics) is printed
//! directly and does not depend on this. Tracing goes to stderr and is off below `warn`
//! unless `RUST_LOG` says otherwise:
//!
//! ```bash
//! RUST_LOG=ok_runner=debug ok scripts/*.f
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Call once, before any script runs.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
