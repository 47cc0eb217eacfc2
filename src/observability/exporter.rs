//! File-backed `SpanExporter` and its OTLP/JSON encoding.

use super::rotation::RotatingFile;
use super::SERVICE_NAME;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, SpanKind, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Builds a tracer provider whose spans are written synchronously to `path`.
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        writer: RotatingFile::new(path),
        resource: resource.clone(),
        is_shutdown: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[derive(Debug)]
struct FileSpanExporter {
    writer: RotatingFile,
    resource: Resource,
    is_shutdown: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            encode_batch(&self.resource, &batch)
                .map_err(|e| TraceError::from(e.to_string()))
                .and_then(|line| {
                    self.writer
                        .append_line(&line)
                        .map_err(|e| TraceError::from(e.to_string()))
                })
        };

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportLine {
    resource_spans: [ResourceSpans; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans {
    resource: OtlpResource,
    scope_spans: [ScopeSpans; 1],
}

#[derive(Serialize)]
struct OtlpResource {
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct ScopeSpans {
    scope: Scope,
    spans: Vec<OtlpSpan>,
}

#[derive(Serialize)]
struct Scope {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpSpan {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    name: String,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<OtlpEvent>,
    status: OtlpStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpEvent {
    time_unix_nano: String,
    name: String,
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct OtlpStatus {
    code: u8,
    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
}

#[derive(Serialize)]
struct Attribute {
    key: String,
    value: AnyValue,
}

/// OTLP `AnyValue`; 64-bit integers travel as strings.
#[derive(Serialize)]
enum AnyValue {
    #[serde(rename = "boolValue")]
    Bool(bool),
    #[serde(rename = "intValue")]
    Int(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "stringValue")]
    String(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::I64(i) => Self::Int(i.to_string()),
            Value::F64(f) => Self::Double(*f),
            Value::String(s) => Self::String(s.to_string()),
            Value::Array(_) => Self::String(value.to_string()),
        }
    }
}

fn attribute(kv: &KeyValue) -> Attribute {
    Attribute {
        key: kv.key.to_string(),
        value: AnyValue::from(&kv.value),
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn encode_span(span: &SpanData) -> OtlpSpan {
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    OtlpSpan {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id: if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        },
        name: span.name.to_string(),
        kind: kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: span.attributes.iter().map(attribute).collect(),
        events: span
            .events
            .iter()
            .map(|event| OtlpEvent {
                time_unix_nano: unix_nanos(event.timestamp),
                name: event.name.to_string(),
                attributes: event.attributes.iter().map(attribute).collect(),
            })
            .collect(),
        status: OtlpStatus { code, message },
    }
}

/// Encodes one batch as a single JSON line.
fn encode_batch(resource: &Resource, batch: &[SpanData]) -> serde_json::Result<String> {
    let line = ExportLine {
        resource_spans: [ResourceSpans {
            resource: OtlpResource {
                attributes: resource
                    .iter()
                    .map(|(key, value)| Attribute {
                        key: key.to_string(),
                        value: AnyValue::from(value),
                    })
                    .collect(),
            },
            scope_spans: [ScopeSpans {
                scope: Scope {
                    name: SERVICE_NAME,
                    version: env!("CARGO_PKG_VERSION"),
                },
                spans: batch.iter().map(encode_span).collect(),
            }],
        }],
    };

    serde_json::to_string(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_carries_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
        let line = encode_batch(&resource, &[]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();

        let rs = &json["resourceSpans"][0];
        let attrs = rs["resource"]["attributes"].as_array().unwrap();
        assert!(attrs
            .iter()
            .any(|a| a["key"] == "service.name" && a["value"]["stringValue"] == SERVICE_NAME));
        assert_eq!(rs["scopeSpans"][0]["scope"]["name"], SERVICE_NAME);
        assert!(rs["scopeSpans"][0]["spans"].as_array().unwrap().is_empty());
    }

    #[test]
    fn int_values_are_strings() {
        let json = serde_json::to_value(AnyValue::from(&Value::I64(42))).unwrap();
        assert_eq!(json, serde_json::json!({ "intValue": "42" }));
    }
}
