//! W3C Trace Context propagation for registry API calls.
//!
//! See: https://www.w3.org/TR/trace-context/

use opentelemetry::trace::{SpanContext, TraceContextExt};
use reqwest::header::{HeaderMap, HeaderValue};
use std::fmt;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";

const SUPPORTED_VERSION: &str = "00";

/// A parsed `traceparent` value: `00-<trace id>-<parent id>-<flags>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceParent {
    trace_id: String,
    parent_id: String,
    flags: u8,
}

impl TraceParent {
    fn from_span_context(span_context: &SpanContext) -> Option<Self> {
        span_context.is_valid().then(|| Self {
            trace_id: span_context.trace_id().to_string(),
            parent_id: span_context.span_id().to_string(),
            flags: span_context.trace_flags().to_u8(),
        })
    }

    /// Parse a header value. Unknown versions and all-zero ids are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('-');
        let version = parts.next()?;
        let trace_id = parts.next()?;
        let parent_id = parts.next()?;
        let flags = parts.next()?;

        if version != SUPPORTED_VERSION || parts.next().is_some() {
            return None;
        }
        if !is_hex_id(trace_id, 32) || !is_hex_id(parent_id, 16) || flags.len() != 2 {
            return None;
        }

        Some(Self {
            trace_id: trace_id.to_ascii_lowercase(),
            parent_id: parent_id.to_ascii_lowercase(),
            flags: u8::from_str_radix(flags, 16).ok()?,
        })
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn is_sampled(&self) -> bool {
        self.flags & 0x01 == 0x01
    }
}

impl fmt::Display for TraceParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{:02x}",
            SUPPORTED_VERSION, self.trace_id, self.parent_id, self.flags
        )
    }
}

fn is_hex_id(id: &str, len: usize) -> bool {
    id.len() == len
        && id.chars().all(|c| c.is_ascii_hexdigit())
        && id.chars().any(|c| c != '0')
}

/// Copy the active span's context onto an outgoing registry request.
///
/// Leaves `headers` alone outside an OpenTelemetry span.
pub fn inject_trace_context(headers: &mut HeaderMap) {
    let context = Span::current().context();
    let span = context.span();
    let span_context = span.span_context();

    let Some(traceparent) = TraceParent::from_span_context(span_context) else {
        return;
    };

    if let Ok(value) = HeaderValue::from_str(&traceparent.to_string()) {
        headers.insert(TRACEPARENT_HEADER, value);
    }

    let tracestate = span_context.trace_state().header();
    if tracestate.is_empty() {
        return;
    }
    if let Ok(value) = HeaderValue::from_str(&tracestate) {
        headers.insert(TRACESTATE_HEADER, value);
    }
}

/// The incoming request's traceparent, normalised. Malformed values are dropped.
pub fn extract_traceparent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(TRACEPARENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(TraceParent::parse)
        .map(|t| t.to_string())
}
