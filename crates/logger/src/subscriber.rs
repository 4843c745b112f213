use std::env::var;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber at `INFO`, honouring `RUST_LOG` and
/// `RUST_LOG_FORMAT`.
pub fn init_tracing() {
    init_tracing_with_level(LevelFilter::INFO);
}

/// Install the global subscriber with `level` as the default directive.
///
/// `RUST_LOG_FORMAT=json` switches to line-delimited JSON output; anything
/// else gives the compact human format. Calling this twice is a no-op.
pub fn init_tracing_with_level(level: LevelFilter) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_format = var("RUST_LOG_FORMAT").unwrap_or_default();

    let log_layer = match log_format.as_str() {
        "json" => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_filter(env_filter)
            .boxed(),
        _ => tracing_subscriber::fmt::layer().compact().with_target(true).with_filter(env_filter).boxed(),
    };

    if let Err(error) = tracing_subscriber::registry().with(log_layer).try_init() {
        warn!("Tracing subscriber already installed: {error}");
    }
}
