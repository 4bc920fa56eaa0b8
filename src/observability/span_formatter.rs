//! OTLP JSON encoding of exported spans.
//!
//! Batches are encoded as one `resourceSpans` document each, the shape OTLP
//! collectors accept on their JSON endpoint. Span links are not emitted; the
//! crate never creates any.

use opentelemetry::trace::{Event, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope name written on every batch.
const SCOPE_NAME: &str = "hangouts";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    resource_spans: [ResourceSpans; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans {
    resource: ResourceAttributes,
    scope_spans: [ScopeSpans; 1],
}

#[derive(Serialize)]
struct ResourceAttributes {
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct ScopeSpans {
    scope: Scope,
    spans: Vec<Span>,
}

#[derive(Serialize)]
struct Scope {
    name: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Span {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    name: String,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<SpanEvent>,
    status: SpanStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpanEvent {
    time_unix_nano: String,
    name: String,
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct SpanStatus {
    code: u8,
    message: String,
}

#[derive(Clone, Serialize)]
struct Attribute {
    key: String,
    value: AnyValue,
}

/// OTLP `AnyValue`; 64-bit integers travel as strings.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
enum AnyValue {
    BoolValue(bool),
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            Value::Array(_) => Self::StringValue(value.to_string()),
        }
    }
}

/// Encodes span batches for one resource.
pub struct SpanFormatter {
    resource: Vec<Attribute>,
}

impl SpanFormatter {
    pub fn new(resource: &Resource) -> Self {
        Self {
            resource: resource
                .iter()
                .map(|(key, value)| Attribute {
                    key: key.to_string(),
                    value: AnyValue::from(value),
                })
                .collect(),
        }
    }

    /// Encodes `batch` as a single-line OTLP JSON document.
    ///
    /// # Errors
    ///
    /// Fails only if JSON encoding fails.
    pub fn format_batch(&self, batch: &[SpanData]) -> serde_json::Result<String> {
        let document = Document {
            resource_spans: [ResourceSpans {
                resource: ResourceAttributes {
                    attributes: self.resource.clone(),
                },
                scope_spans: [ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(encode_span).collect(),
                }],
            }],
        };
        serde_json::to_string(&document)
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("resource_attributes", &self.resource.len())
            .finish()
    }
}

fn encode_span(span: &SpanData) -> Span {
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    Span {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id,
        name: span.name.to_string(),
        kind: kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: encode_attributes(&span.attributes),
        events: span.events.iter().map(encode_event).collect(),
        status: SpanStatus { code, message },
    }
}

fn encode_event(event: &Event) -> SpanEvent {
    SpanEvent {
        time_unix_nano: unix_nanos(event.timestamp),
        name: event.name.to_string(),
        attributes: encode_attributes(&event.attributes),
    }
}

fn encode_attributes(attributes: &[KeyValue]) -> Vec<Attribute> {
    attributes
        .iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: AnyValue::from(&kv.value),
        })
        .collect()
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

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}
