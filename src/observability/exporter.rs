//! OpenTelemetry span exporter writing one JSON object per finished span.
//!
//! The line format is deliberately flat so trace files can be grepped or fed to `jq`
//! without an OTLP collector:
//!
//! ```json
//! {"service":"menuhub","traceId":"…","spanId":"…","parentSpanId":null,"name":"search_restaurants",
//!  "kind":"internal","startUnixNano":"…","durationMicros":412,"attributes":{"locality":"austin"},
//!  "events":[{"name":"…","attributes":{}}],"status":"unset"}
//! ```

use super::trace_file::TraceFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, SpanKind, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug)]
pub struct JsonLinesExporter {
    file: TraceFile,
    service: String,
    is_shutdown: bool,
}

impl JsonLinesExporter {
    pub fn new(file: TraceFile, service: impl Into<String>) -> Self {
        Self {
            file,
            service: service.into(),
            is_shutdown: false,
        }
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let result = batch
            .iter()
            .map(|span| format_span(&self.service, span).to_string())
            .try_for_each(|line| self.file.append(&line))
            .map_err(|e| TraceError::from(e.to_string()));

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, res: &Resource) {
        if let Some(name) = res.get(opentelemetry::Key::from_static_str("service.name")) {
            self.service = name.to_string();
        }
    }
}

/// Builds a tracer provider that exports synchronously to `path`.
pub fn create_tracer_provider(path: PathBuf, service: &str) -> TracerProvider {
    let resource = Resource::new(vec![KeyValue::new("service.name", service.to_string())]);
    let exporter = JsonLinesExporter::new(TraceFile::new(path), service);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn format_span(service: &str, span: &SpanData) -> JsonValue {
    let parent = (span.parent_span_id != SpanId::INVALID)
        .then(|| format!("{:016x}", span.parent_span_id));
    let duration = span
        .end_time
        .duration_since(span.start_time)
        .unwrap_or(Duration::ZERO);

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| json!({ "name": event.name, "attributes": attributes(&event.attributes) }))
        .collect();

    json!({
        "service": service,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_name(&span.span_kind),
        "startUnixNano": unix_nanos(span.start_time).to_string(),
        "durationMicros": u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        "attributes": attributes(&span.attributes),
        "events": events,
        "status": status_text(&span.status),
    })
}

fn attributes(pairs: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = pairs
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

const fn kind_name(kind: &SpanKind) -> &'static str {
    match kind {
        SpanKind::Internal => "internal",
        SpanKind::Server => "server",
        SpanKind::Client => "client",
        SpanKind::Producer => "producer",
        SpanKind::Consumer => "consumer",
    }
}

fn status_text(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO).as_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};

    #[test]
    fn finished_spans_are_written_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let provider = create_tracer_provider(path.clone(), "menuhub-test");
        let tracer = provider.tracer("menuhub-test");

        tracer.in_span("outer", |_cx| {
            tracer.in_span("inner", |_cx| {});
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<JsonValue> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["name"], "inner");
        assert_eq!(lines[1]["name"], "outer");
        assert_eq!(lines[0]["service"], "menuhub-test");
        assert_eq!(lines[0]["traceId"], lines[1]["traceId"]);
        assert_eq!(lines[0]["parentSpanId"], lines[1]["spanId"]);
        assert!(lines[1]["parentSpanId"].is_null());
        assert_eq!(lines[1]["traceId"].as_str().map(str::len), Some(32));
    }

    #[test]
    fn attribute_values_keep_their_json_types() {
        let pairs = vec![
            KeyValue::new("locality", "austin"),
            KeyValue::new("page", 2_i64),
            KeyValue::new("stale", false),
        ];
        assert_eq!(
            attributes(&pairs),
            json!({ "locality": "austin", "page": 2, "stale": false })
        );
    }
}
