//! Continues an upstream trace from W3C `traceparent` request headers.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

/// Remote parent for the request span, when the caller sent a valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| remote_parent(propagator, headers))
}

fn remote_parent(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    // Start from an empty context so a request without trace headers never
    // picks up whatever span is active on this task.
    let context = propagator.extract_with_context(&Context::new(), &RequestHeaders(headers));

    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}

#[derive(Debug)]
struct RequestHeaders<'a>(&'a HeaderMap);

impl Extractor for RequestHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
