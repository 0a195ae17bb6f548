//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays clean for `--json` output. The filter
//! comes from `RELOCATE_LOG` when set, otherwise from the `-v` count.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RELOCATE_LOG";

pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter(verbose))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Subscriber writing to the test harness; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}
