//! Tracing subscriber installation.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the default filter directive for `level`.
#[must_use]
pub fn default_directive(level: &str) -> String {
    format!("task_api={level},tower_http={level}")
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise events from this crate and
/// `tower_http` are emitted at `level`. Calling this more than once is a
/// no-op.
pub fn init(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    if tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
