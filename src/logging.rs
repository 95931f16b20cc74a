//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so command output on stdout stays pipeable. `RUST_LOG`
//! wins when set; otherwise `hrdesk=info`, or `hrdesk=debug` with `-v`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "hrdesk=debug" } else { "hrdesk=info" }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
