//! Metrics collection for the blog graph engine
//!
//! Each engine owns its own Prometheus registry so several engines can live
//! in one process (one per test) without colliding registrations.

use crate::core::error::{Error, Result};
use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

/// Counters and gauges describing resolver activity
#[derive(Clone)]
pub struct EngineMetrics {
    registry: Registry,
    /// Successful mutations by operation name
    pub mutations: IntCounterVec,
    /// Rejected mutations by error kind
    pub mutation_failures: IntCounterVec,
    /// Entities removed as part of a cascade, by entity type
    pub cascade_removed: IntCounterVec,
    /// Query root invocations by operation name
    pub queries: IntCounterVec,
    /// Current collection sizes
    pub entities: IntGaugeVec,
}

impl EngineMetrics {
    /// Create a fresh registry with every metric registered
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let mutations = IntCounterVec::new(
            Opts::new("bg_mutations_total", "Total number of successful mutations"),
            &["operation"],
        )?;
        let mutation_failures = IntCounterVec::new(
            Opts::new("bg_mutation_failures_total", "Total number of rejected mutations"),
            &["kind"],
        )?;
        let cascade_removed = IntCounterVec::new(
            Opts::new(
                "bg_cascade_removed_total",
                "Entities removed by delete cascades",
            ),
            &["entity"],
        )?;
        let queries = IntCounterVec::new(
            Opts::new("bg_queries_total", "Total number of query root invocations"),
            &["operation"],
        )?;
        let entities = IntGaugeVec::new(
            Opts::new("bg_entities", "Current number of stored entities"),
            &["entity"],
        )?;

        registry.register(Box::new(mutations.clone()))?;
        registry.register(Box::new(mutation_failures.clone()))?;
        registry.register(Box::new(cascade_removed.clone()))?;
        registry.register(Box::new(queries.clone()))?;
        registry.register(Box::new(entities.clone()))?;

        Ok(Self {
            registry,
            mutations,
            mutation_failures,
            cascade_removed,
            queries,
            entities,
        })
    }

    /// Count a successful mutation
    pub fn record_mutation(&self, operation: &str) {
        self.mutations.with_label_values(&[operation]).inc();
    }

    /// Count a rejected mutation
    pub fn record_failure(&self, error: &Error) {
        self.mutation_failures.with_label_values(&[error.kind()]).inc();
    }

    /// Count entities removed by a cascade
    pub fn record_cascade(&self, entity: &str, removed: usize) {
        if removed > 0 {
            self.cascade_removed
                .with_label_values(&[entity])
                .inc_by(removed as u64);
        }
    }

    /// Count a query root invocation
    pub fn record_query(&self, operation: &str) {
        self.queries.with_label_values(&[operation]).inc();
    }

    /// Publish collection sizes
    pub fn set_entity_counts(&self, users: usize, posts: usize, comments: usize) {
        self.entities.with_label_values(&["User"]).set(users as i64);
        self.entities.with_label_values(&["Post"]).set(posts as i64);
        self.entities.with_label_values(&["Comment"]).set(comments as i64);
    }

    /// Render every metric in the Prometheus text exposition format
    pub fn encode_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::internal(format!("Metrics are not UTF-8: {}", e)))
    }
}
