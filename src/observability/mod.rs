//! Tracing export to a local OTLP JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → FileSpanExporter → libris-otlp.json
//! ```
//!
//! Each exported batch becomes one line of OTLP/JSON (`resourceSpans` →
//! `scopeSpans` → `spans`), so the file can be fed to any OTLP-aware viewer.
//! The file rotates at a size limit and only a few timestamped backups are
//! kept.
//!
//! Observability is optional: if the data directory cannot be created or the
//! subscriber is already set, initialization quietly does nothing.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: `SpanExporter` implementation and OTLP encoding
//! - [`rotation`]: Size-based rotating line writer

mod exporter;
mod init;
mod rotation;

pub use init::init_tracing;

/// Service name reported in the trace resource and as the scope name.
pub const SERVICE_NAME: &str = "Libris";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "libris-otlp.json";
