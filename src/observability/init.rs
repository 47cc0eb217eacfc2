//! Subscriber setup.

use super::{exporter, SERVICE_NAME, TRACE_FILE_NAME};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when none is configured.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber, exporting spans under `data_dir`.
///
/// `level` is an `EnvFilter` directive such as `"debug"` or
/// `"libris=trace,warn"`. Calling this twice is harmless; only the first
/// subscriber is kept.
pub fn init_tracing(level: Option<&str>, data_dir: &Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = exporter::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
