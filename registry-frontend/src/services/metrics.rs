use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use prometheus::{Encoder, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;
use std::time::Instant;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// Metrics
pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static HTTP_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static GUARD_OUTCOMES_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Registers the console's collectors. Calling it again is a no-op.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if REGISTRY.get().is_some() {
        return Ok(());
    }

    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "path", "status"],
    )?;

    let request_duration = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        ),
        &["method", "path", "status"],
    )?;

    let guard_outcomes = IntCounterVec::new(
        Opts::new("route_guard_outcomes_total", "Route guard evaluations by outcome"),
        &["route", "outcome"],
    )?;

    registry.register(Box::new(requests_total.clone()))?;
    registry.register(Box::new(request_duration.clone()))?;
    registry.register(Box::new(guard_outcomes.clone()))?;

    // Initialize globals
    let _ = REGISTRY.set(registry);
    let _ = HTTP_REQUESTS_TOTAL.set(requests_total);
    let _ = HTTP_REQUEST_DURATION_SECONDS.set(request_duration);
    let _ = GUARD_OUTCOMES_TOTAL.set(guard_outcomes);

    Ok(())
}

pub fn record_guard_outcome(route: &str, outcome: &str) {
    if let Some(counter) = GUARD_OUTCOMES_TOTAL.get() {
        counter.with_label_values(&[route, outcome]).inc();
    }
}

/// Counts and times every request, labelled by the matched route pattern.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    let labels = [method.as_str(), path.as_str(), status.as_str()];

    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        counter.with_label_values(&labels).inc();
    }
    if let Some(histogram) = HTTP_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&labels)
            .observe(start.elapsed().as_secs_f64());
    }

    response
}

pub fn get_metrics() -> Result<String, anyhow::Error> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let registry = REGISTRY
        .get()
        .ok_or_else(|| anyhow::anyhow!("metrics registry not initialized"))?;
    let metric_families = registry.gather();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_outcomes_are_exported() {
        init_metrics().unwrap();
        init_metrics().unwrap();
        record_guard_outcome("home", "redirect");

        let text = get_metrics().unwrap();
        assert!(text.contains("route_guard_outcomes_total"));
        assert!(text.contains("route=\"home\""));
    }
}
