//! System utilities and monitoring

/// Prometheus counters for resolver activity
pub mod metrics;

pub use metrics::EngineMetrics;
