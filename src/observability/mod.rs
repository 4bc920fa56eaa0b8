//! OpenTelemetry tracing with file-based trace export.
//!
//! Spans emitted around dispatch, reducer transitions and storage calls are
//! exported as OTLP JSON lines to a local, size-rotated file for offline
//! analysis.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer provider
//!               → OtlpFileExporter → trace file
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! The file defaults to `<data_dir>/hangouts-otlp.json`, rotating at 10 MB
//! with three backups.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: Size-rotated line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
