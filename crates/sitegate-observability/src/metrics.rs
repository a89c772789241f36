//! Metrics collection with Prometheus
//!
//! This module provides Prometheus metrics for SiteGate:
//! - Routing decisions (pass-through, rewrite, redirect by reason)
//! - Dispatch outcomes per theme (composed, fallback, theme missing,
//!   tenant not found)
//! - Backend project fetches (count by result, latency)

use prometheus::{CounterVec, Histogram, HistogramOpts, Opts, Registry};
use std::sync::Arc;

/// Metrics collector for SiteGate
#[derive(Clone)]
pub struct Metrics {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Tenant resolver decisions
    pub routing_decisions_total: CounterVec,

    /// Page dispatch outcomes
    pub dispatch_total: CounterVec,

    /// Backend project lookups
    pub project_fetch_total: CounterVec,
    /// Backend project lookup duration
    pub project_fetch_duration_seconds: Histogram,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let routing_decisions_total = CounterVec::new(
            Opts::new(
                "sitegate_routing_decisions_total",
                "Total number of tenant routing decisions",
            ),
            &["decision"],
        )?;

        let dispatch_total = CounterVec::new(
            Opts::new(
                "sitegate_dispatch_total",
                "Total number of tenant page dispatches by outcome",
            ),
            &["theme", "outcome"],
        )?;

        let project_fetch_total = CounterVec::new(
            Opts::new(
                "sitegate_project_fetch_total",
                "Total number of backend project lookups",
            ),
            &["result"],
        )?;

        let project_fetch_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "sitegate_project_fetch_duration_seconds",
                "Backend project lookup duration in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;

        registry.register(Box::new(routing_decisions_total.clone()))?;
        registry.register(Box::new(dispatch_total.clone()))?;
        registry.register(Box::new(project_fetch_total.clone()))?;
        registry.register(Box::new(project_fetch_duration_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            routing_decisions_total,
            dispatch_total,
            project_fetch_total,
            project_fetch_duration_seconds,
        })
    }

    /// Get the Prometheus registry for exporting metrics
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a tenant resolver decision
    pub fn record_routing_decision(&self, decision: &str) {
        self.routing_decisions_total
            .with_label_values(&[decision])
            .inc();
    }

    /// Record a page dispatch outcome
    pub fn record_dispatch(&self, theme: &str, outcome: &str) {
        self.dispatch_total.with_label_values(&[theme, outcome]).inc();
    }

    /// Record a backend project lookup
    pub fn record_project_fetch(&self, result: &str, duration_secs: f64) {
        self.project_fetch_total.with_label_values(&[result]).inc();
        self.project_fetch_duration_seconds.observe(duration_secs);
    }
}
