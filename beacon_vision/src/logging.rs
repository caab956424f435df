// THEORY:
// The library only emits `tracing` events; it never installs a subscriber on its
// own. Binaries call `setup_logging` once at startup to route those events to
// stderr, with `RUST_LOG` taking precedence over the level they ask for.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a console subscriber. `RUST_LOG` wins over `base_level` when set.
///
/// Safe to call more than once; only the first call installs anything.
pub fn setup_logging(base_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(base_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_writer(std::io::stderr);

    // A second init fails because a global subscriber already exists; that is fine.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}
