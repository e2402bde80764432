//! Telemetry and Observability
//!
//! Structured logging setup.

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const DEFAULT_FILTER: &str = "info,catalog_server=debug,sqlx=warn,tower_http=debug";

/// Initialize tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Set `LOG_FORMAT=json` for
/// one JSON object per line instead of human-readable output.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    }

    tracing::info!("Tracing initialized");
}
