//! Tracing setup, file-based span export and trace context propagation.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (stderr)
//!                            → tracing-opentelemetry → SDK → JsonLinesExporter → trace file
//! ```
//!
//! The OpenTelemetry branch is only installed when `trace_file` is configured.
//! Outgoing HTTP requests carry a W3C `traceparent` header derived from the active
//! span (see [`traceparent`]), so backend traces can be joined with client ones.
//!
//! # Configuration
//!
//! Filter directives come from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`crate::Config`]
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - `exporter`: JSON-lines `SpanExporter` and tracer provider
//! - `trace_file`: size-capped append-only file
//! - [`propagation`]: `traceparent` header value

mod exporter;
pub mod init;
pub mod propagation;
mod trace_file;

pub use init::{init_tracing, TracingGuard, SERVICE_NAME};
pub use propagation::{traceparent, TRACEPARENT_HEADER};
