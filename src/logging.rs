//! Diagnostic logging via `tracing`
//!
//! Status lines meant for the user go through `colored` in the binary; this
//! subscriber carries the pipeline's debug/info events on stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding an `EnvFilter` directive, e.g. `gocov_tree=debug`
pub const LOG_ENV: &str = "GOCOV_TREE_LOG";

/// Filter directive used when the environment does not provide one
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "gocov_tree=debug",
        (false, true) => "error",
        (false, false) => "warn",
    }
}

fn build_env_filter(verbose: bool, quiet: bool) -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.is_empty() => EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet))),
        _ => EnvFilter::new(default_directive(verbose, quiet)),
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(verbose: bool, quiet: bool) {
    let _ = Registry::default()
        .with(build_env_filter(verbose, quiet))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
