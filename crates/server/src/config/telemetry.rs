use std::collections::HashMap;

use serde::Deserialize;

/// Configuration for `OpenTelemetry` distributed tracing.
///
/// When enabled, spans for each request and every store call it makes are
/// exported via OTLP to a collector such as Jaeger or Grafana Tempo.
///
/// # Example
///
/// ```toml
/// [telemetry]
/// enabled = true
/// endpoint = "http://localhost:4317"
/// protocol = "grpc"
/// sample_ratio = 0.25
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    /// OTLP collector endpoint.
    pub endpoint: String,
    /// Reported as `service.name`.
    pub service_name: String,
    /// Fraction of traces kept, from `0.0` to `1.0`.
    pub sample_ratio: f64,
    /// `"grpc"` or `"http"`.
    pub protocol: String,
    /// Exporter timeout in seconds.
    pub timeout_seconds: u64,
    /// Extra resource attributes attached to every span.
    pub resource_attributes: HashMap<String, String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://localhost:4317".to_owned(),
            service_name: "stockroom".to_owned(),
            sample_ratio: 1.0,
            protocol: "grpc".to_owned(),
            timeout_seconds: 10,
            resource_attributes: HashMap::new(),
        }
    }
}
