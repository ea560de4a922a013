//! Admission and directory-lookup metrics with Prometheus text export

use super::decision::Decision;
use crate::session::LookupOutcome;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Access layer counters
#[derive(Debug, Clone, Default)]
pub struct AccessMetrics {
    /// Admission decisions by kind
    pub wait_decisions: u64,
    pub redirect_decisions: u64,
    pub banned_decisions: u64,
    pub admit_decisions: u64,

    /// Directory lookups by outcome
    pub lookups_applied: u64,
    pub lookups_failed: u64,
    pub lookups_stale: u64,

    /// Lookup latency (token + directory round trip)
    pub lookup_p50_ms: f64,
    pub lookup_p99_ms: f64,
    pub avg_lookup_ms: f64,
}

impl AccessMetrics {
    pub fn total_decisions(&self) -> u64 {
        self.wait_decisions + self.redirect_decisions + self.banned_decisions + self.admit_decisions
    }

    /// Share of finished lookups that failed
    pub fn lookup_failure_rate(&self) -> f64 {
        let total = self.lookups_applied + self.lookups_failed;
        if total == 0 {
            0.0
        } else {
            self.lookups_failed as f64 / total as f64
        }
    }
}

/// Metrics collector shared by the session store and admission gate
pub struct MetricsCollector {
    metrics: Arc<RwLock<AccessMetrics>>,

    /// Latency samples for percentile calculation
    latency_samples: Arc<RwLock<Vec<f64>>>,

    max_samples: usize,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(AccessMetrics::default())),
            latency_samples: Arc::new(RwLock::new(Vec::with_capacity(1_024))),
            max_samples: 1_024,
        }
    }

    /// Record an admission decision
    pub async fn record_decision(&self, decision: &Decision) {
        let mut metrics = self.metrics.write().await;
        match decision {
            Decision::Wait => metrics.wait_decisions += 1,
            Decision::Redirect(_) => metrics.redirect_decisions += 1,
            Decision::Banned => metrics.banned_decisions += 1,
            Decision::Admit => metrics.admit_decisions += 1,
        }
    }

    /// Record a finished directory lookup
    pub async fn record_lookup(&self, outcome: LookupOutcome, latency: Duration) {
        {
            let mut metrics = self.metrics.write().await;
            match outcome {
                LookupOutcome::Applied => metrics.lookups_applied += 1,
                LookupOutcome::Failed => metrics.lookups_failed += 1,
                LookupOutcome::Stale => metrics.lookups_stale += 1,
                LookupOutcome::NoIdentity => return,
            }
        }
        self.record_latency(latency).await;
    }

    async fn record_latency(&self, latency: Duration) {
        let latency_ms = latency.as_secs_f64() * 1000.0;

        let mut samples = self.latency_samples.write().await;
        samples.push(latency_ms);
        if samples.len() > self.max_samples {
            samples.drain(0..self.max_samples / 8);
        }

        let mut metrics = self.metrics.write().await;
        metrics.avg_lookup_ms = samples.iter().sum::<f64>() / samples.len() as f64;

        let mut sorted = samples.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        metrics.lookup_p50_ms = Self::percentile(&sorted, 0.50);
        metrics.lookup_p99_ms = Self::percentile(&sorted, 0.99);
    }

    /// Current metrics snapshot
    pub async fn get_metrics(&self) -> AccessMetrics {
        self.metrics.read().await.clone()
    }

    pub async fn reset(&self) {
        *self.metrics.write().await = AccessMetrics::default();
        self.latency_samples.write().await.clear();
    }

    /// Export metrics in Prometheus format
    pub async fn export_prometheus(&self) -> String {
        let metrics = self.metrics.read().await;

        format!(
            r#"# HELP access_decisions_total Route admission decisions
# TYPE access_decisions_total counter
access_decisions_total{{decision="wait"}} {}
access_decisions_total{{decision="redirect"}} {}
access_decisions_total{{decision="banned"}} {}
access_decisions_total{{decision="admit"}} {}

# HELP access_directory_lookups_total Directory lookups by outcome
# TYPE access_directory_lookups_total counter
access_directory_lookups_total{{outcome="applied"}} {}
access_directory_lookups_total{{outcome="failed"}} {}
access_directory_lookups_total{{outcome="stale"}} {}

# HELP access_directory_lookup_seconds Directory lookup latency
# TYPE access_directory_lookup_seconds summary
access_directory_lookup_seconds{{quantile="0.5"}} {}
access_directory_lookup_seconds{{quantile="0.99"}} {}
"#,
            metrics.wait_decisions,
            metrics.redirect_decisions,
            metrics.banned_decisions,
            metrics.admit_decisions,
            metrics.lookups_applied,
            metrics.lookups_failed,
            metrics.lookups_stale,
            metrics.lookup_p50_ms / 1000.0,
            metrics.lookup_p99_ms / 1000.0,
        )
    }

    fn percentile(sorted: &[f64], p: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }

        let idx = ((sorted.len() as f64) * p) as usize;
        sorted[idx.min(sorted.len() - 1)]
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
