//! W3C trace context propagation for outgoing requests.

use opentelemetry::trace::TraceContextExt;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Header name for W3C trace context.
pub const TRACEPARENT_HEADER: &str = "traceparent";

/// `traceparent` value for the current `tracing` span.
///
/// Returns `None` when no OpenTelemetry layer is installed or the current span is not
/// sampled into a valid trace.
#[must_use]
pub fn traceparent() -> Option<String> {
    let context = tracing::Span::current().context();
    let span = context.span();
    let span_context = span.span_context();

    if !span_context.is_valid() {
        return None;
    }

    Some(format!(
        "00-{:032x}-{:016x}-{:02x}",
        span_context.trace_id(),
        span_context.span_id(),
        span_context.trace_flags().to_u8()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_without_subscriber() {
        let _span = tracing::info_span!("no_otel").entered();
        assert_eq!(traceparent(), None);
    }
}
