//! Subscriber installation for hosts and tests that want to see registry
//! events.
//!
//! Registry events are logged at `debug` and failed invocation checks at
//! `trace`. Select them with `RUST_LOG=umeta_core=debug`, or with
//! `RUST_LOG=umeta_core=trace,umeta_bind=debug` to also see binding failures.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static SUBSCRIBER: Once = Once::new();

/// Install a formatting subscriber driven by `RUST_LOG`.
///
/// Only the first call has an effect. Nothing is installed when `RUST_LOG`
/// is unset or unparsable, or when the host already set a global subscriber.
pub fn init_tracing() {
    SUBSCRIBER.call_once(|| {
        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).without_time())
            .with(filter)
            .try_init();
        if installed.is_ok() {
            tracing::debug!(target: "umeta_core", "tracing enabled");
        }
    });
}
