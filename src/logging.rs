//! Logging setup for the command-line binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application. The CLI calls [`init`] once at startup.
//!
//! Priority: `RUST_LOG` env var > `--debug` flag > [`DEFAULT_LOG_LEVEL`].
//! Output goes to stderr so it never mixes with written records or the
//! summary on stdout.

use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor `--debug` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Installs the global `fmt` subscriber.
///
/// Calling it a second time is a no-op.
pub fn init(debug_flag: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialised");
    }
}
