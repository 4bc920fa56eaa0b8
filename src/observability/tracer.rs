//! Tracer provider that exports spans to a rotating OTLP JSON file.
//!
//! The exporter runs synchronously inside the simple span processor: each
//! finished span is encoded and appended before the span call returns.

use super::file_writer::RotatingFile;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Span exporter appending one OTLP document per batch.
///
/// Implements `SpanExporter` on top of a [`RotatingFile`]. Each batch becomes
/// a complete `resourceSpans` document carrying the resource attributes, so
/// every line of the trace file can be read on its own.
#[derive(Debug)]
struct OtlpFileExporter {
    /// Destination file, rotated by size.
    file: RotatingFile,
    /// OTLP JSON encoder holding the resource attributes.
    formatter: SpanFormatter,
    /// Set on shutdown; later exports fail.
    stopped: bool,
}

impl OtlpFileExporter {
    /// Encodes `batch` and appends it as one line.
    ///
    /// # Parameters
    ///
    /// * `batch` - Finished spans handed over by the span processor
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is flushed
    /// - `Err(TraceError)` after shutdown, or when encoding or writing fails
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.stopped {
            return Err(TraceError::from("trace exporter stopped"));
        }
        let line = self
            .formatter
            .format_batch(batch)
            .map_err(|e| TraceError::from(e.to_string()))?;
        self.file
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for OtlpFileExporter {
    /// Exports a batch of spans to the trace file.
    ///
    /// The write happens before the returned future is built, so the future
    /// is always ready.
    ///
    /// # Parameters
    ///
    /// * `batch` - Batch of span data to export
    ///
    /// # Returns
    ///
    /// A ready future holding the result of [`OtlpFileExporter::write_batch`].
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    /// Stops the exporter.
    ///
    /// Exports after this point fail. The file handle is closed when the
    /// exporter is dropped.
    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

/// Builds a tracer provider exporting to `trace_file` with `resource` metadata.
///
/// The provider uses the simple span processor: spans are exported one by
/// one as they end, with no background batching thread.
///
/// # Parameters
///
/// * `trace_file` - Path of the OTLP JSON trace file, rotated at the default limits
/// * `resource` - Resource attributes (service name) stamped on every batch
///
/// # Returns
///
/// A `TracerProvider` ready to back a `tracing-opentelemetry` layer.
///
/// # Example
///
/// ```rust,ignore
/// use opentelemetry::KeyValue;
/// use opentelemetry_sdk::resource::Resource;
///
/// let resource = Resource::new(vec![KeyValue::new("service.name", "hangouts")]);
/// let provider = file_tracer_provider("/tmp/hangouts-otlp.json".into(), resource);
/// ```
pub fn file_tracer_provider(trace_file: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        file: RotatingFile::new(trace_file),
        formatter: SpanFormatter::new(&resource),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
