//! Tracing setup for the CLI.
//!
//! Logs go to stderr so `--json` reports on stdout stay machine-readable.

use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber.
///
/// Subsequent calls are ignored.
pub fn init_tracing(verbosity: u8, json: bool) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));
        let registry = tracing_subscriber::registry().with(env_filter);

        let result = if json {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
                .try_init()
        };
        if let Err(err) = result {
            eprintln!("tracing already initialized: {err}");
        }
    });
}
