//! Tracing subscriber setup for the binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Target every kakeibo event is recorded under.
pub const LOG_TARGET: &str = env!("CARGO_PKG_NAME");

/// Level for kakeibo's own events and the fallback `RUST_LOG` directive.
fn levels(verbose: bool) -> (LevelFilter, &'static str) {
    if verbose {
        (LevelFilter::DEBUG, "debug")
    } else {
        (LevelFilter::OFF, "off")
    }
}

/// Logs go to stderr so screen output on stdout stays clean.
pub fn init_logging(verbose: bool) {
    let (level_filter, directive) = levels(verbose);
    let kakeibo_only = Targets::new().with_target(LOG_TARGET, level_filter);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(kakeibo_only)
        .with(env_filter)
        .init();
}
