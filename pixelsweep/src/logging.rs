//! Diagnostic tracing for the sweep driver.
//!
//! stdout belongs to the sweep's progress lines (`Running command:`,
//! `Generated:`, `Error generating ...`), which are always printed. Tracing
//! goes to stderr and carries what those lines leave out: drawn parameter
//! sets and child exit codes at `debug`, failed invocations and renamed
//! colliding outputs at `warn`, sweep start and totals at `info`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset: failures and collisions only.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber, filtered by `RUST_LOG`.
///
/// ```bash
/// RUST_LOG=pixelsweep=debug pixelsweep photo.jpg 2> sweep.log
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
