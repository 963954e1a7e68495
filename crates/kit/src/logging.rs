use std::sync::Once;

use tracing_subscriber::{
    filter::{FilterFn, LevelFilter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Install the global subscriber. Only the first call has any effect.
///
/// Events from outside the `oba_*` crates are dropped.
pub fn setup_logging(level: Option<&str>) {
    static LOGGING_SETUP: Once = Once::new();

    let level = parse_level(level);
    LOGGING_SETUP.call_once(|| {
        let filter = FilterFn::new(|meta| meta.module_path().unwrap_or_default().starts_with("oba_"));
        let layer = tracing_subscriber::fmt::layer().with_target(false);
        let installed = tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .with(level)
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global subscriber was already installed");
        }
    })
}

fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|l| l.trim().parse().ok())
        .unwrap_or(LevelFilter::INFO)
}
