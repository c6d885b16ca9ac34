//! Prometheus metrics for the token service.

use once_cell::sync::Lazy;
use prometheus::{
    CounterVec, Encoder, HistogramVec, TextEncoder, register_counter_vec, register_histogram_vec,
};

/// Token pairs handed out, by operation (`issue` / `rotate`).
pub static TOKENS_ISSUED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "token_service_tokens_issued_total",
        "Total number of token pairs issued",
        &["operation", "algorithm"]
    )
    .expect("Failed to register tokens_issued metric")
});

/// Failed operations, by operation and error class.
pub static AUTH_FAILURES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "token_service_auth_failures_total",
        "Total number of failed issue or rotate calls",
        &["operation", "class"]
    )
    .expect("Failed to register auth_failures metric")
});

/// End-to-end operation latency.
pub static OPERATION_LATENCY: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "token_service_operation_latency_seconds",
        "Issue and rotate latency in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register operation_latency metric")
});

/// Record a pair handed out by `operation`.
pub fn record_tokens_issued(operation: &str, algorithm: &str) {
    TOKENS_ISSUED.with_label_values(&[operation, algorithm]).inc();
}

/// Record a failed `operation`.
pub fn record_failure(operation: &str, class: &str) {
    AUTH_FAILURES.with_label_values(&[operation, class]).inc();
}

/// Record how long `operation` took.
pub fn record_latency(operation: &str, duration_secs: f64) {
    OPERATION_LATENCY
        .with_label_values(&[operation])
        .observe(duration_secs);
}

/// Render every registered metric in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    // Touch the statics so they appear before the first request.
    Lazy::force(&TOKENS_ISSUED);
    Lazy::force(&AUTH_FAILURES);
    Lazy::force(&OPERATION_LATENCY);

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
