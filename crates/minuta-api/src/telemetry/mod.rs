use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing for console output.
///
/// Compact format (message string for convenience); `RUST_LOG` overrides the
/// default filter. Safe to call more than once - later calls are no-ops.
pub fn init_telemetry() {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minuta=debug,tower_http=debug".into()),
        )
        .with(console_fmt)
        .try_init();
}
