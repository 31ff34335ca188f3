//! Tracing initialization and subscriber setup.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`], a human-readable
//! stderr layer and, when a trace file is configured, an OpenTelemetry layer that
//! writes every finished span to that file.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported on exported spans.
pub const SERVICE_NAME: &str = "menuhub";

const DEFAULT_LEVEL: &str = "info";

/// Owns the tracer provider backing the file exporter, if one was installed.
#[derive(Debug, Default)]
pub struct TracingGuard {
    provider: Option<TracerProvider>,
}

impl TracingGuard {
    /// Whether spans are being exported to a file.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

/// Initializes the global tracing subscriber.
///
/// Filter directives are resolved in order:
/// 1. `RUST_LOG`
/// 2. `config.trace_level`
/// 3. `"info"`
///
/// Safe to call more than once; only the first call installs a subscriber.
///
/// # Example
///
/// ```rust
/// use menuhub::observability::init_tracing;
/// use menuhub::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// let _guard = init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
#[must_use]
pub fn init_tracing(config: &Config) -> TracingGuard {
    let directives = filter_directives(config, std::env::var("RUST_LOG").ok());
    let provider = config
        .trace_file
        .clone()
        .map(|path| exporter::create_tracer_provider(path, SERVICE_NAME));

    let otel_layer = provider
        .as_ref()
        .map(|provider| OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(&directives))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();

    match installed {
        Ok(()) => {
            tracing::debug!(
                filter = %directives,
                trace_file = ?config.trace_file,
                "tracing initialized"
            );
            TracingGuard { provider }
        }
        Err(_) => TracingGuard::default(),
    }
}

/// Chooses the filter directives: `rust_log` if non-blank, then the configured level.
fn filter_directives(config: &Config, rust_log: Option<String>) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}
