//! Console logging for queue deployments.
//!
//! The buffering worker logs migrations at debug and failed migrations at
//! warn under the `duraq` target; the store logs rolled-back transactions.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Installs the global subscriber with a `duraq`-scoped default filter.
///
/// Thread names are included so worker activity (`duraq-buffer`) is
/// attributable in the output. Repeat calls are no-ops, so embedding
/// applications and test binaries can both call this unconditionally.
pub fn init_logging() {
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,duraq=debug"));

    let formatting_layer = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_thread_names(true)
        .with_target(true)
        .compact();

    let subscriber = Registry::default().with(filter).with(formatting_layer);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed; keeping it");
    }
}
