use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured stdout tracing. Call once at service startup.
///
/// Uses JSON format. The filter comes from `RUST_LOG`, falling back to
/// `default_filter` (e.g. `"info,sqlx=warn"`) when unset or unparsable.
/// Subsequent calls are ignored.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
