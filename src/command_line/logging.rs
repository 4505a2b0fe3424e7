//! Diagnostics for the binary.
//!
//! The engine emits `tracing` events (`info` per run, `debug` per directive,
//! `trace` per relink). Results and statistics are printed to stdout by
//! [`super::cli`] and are unaffected by the filter configured here.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset, or to `debug` when the
/// `--debug` flag was given. Output goes to stderr in compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=supply_stacks=trace supply-stacks input.txt
/// ```
pub(crate) fn init(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
