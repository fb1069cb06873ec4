//! Prometheus metrics for monitoring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total JSON-RPC / HTTP requests processed
    pub requests_total: AtomicU64,
    /// Requests answered with a protocol error
    pub requests_failed: AtomicU64,
    /// Tool calls
    pub tool_calls: AtomicU64,
    /// Tool calls that returned an error
    pub tool_errors: AtomicU64,
    /// Progress operations started
    pub progress_started: AtomicU64,
    /// Progress operations completed
    pub progress_completed: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_requests(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failed(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tool_calls(&self) {
        self.tool_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tool_errors(&self) {
        self.tool_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_progress_started(&self) {
        self.progress_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_progress_completed(&self) {
        self.progress_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            tool_calls: self.tool_calls.load(Ordering::Relaxed),
            tool_errors: self.tool_errors.load(Ordering::Relaxed),
            progress_started: self.progress_started.load(Ordering::Relaxed),
            progress_completed: self.progress_completed.load(Ordering::Relaxed),
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"# HELP mcp_progress_requests_total Total number of requests
# TYPE mcp_progress_requests_total counter
mcp_progress_requests_total {}

# HELP mcp_progress_requests_failed Requests answered with an error
# TYPE mcp_progress_requests_failed counter
mcp_progress_requests_failed {}

# HELP mcp_progress_tool_calls Tool calls count
# TYPE mcp_progress_tool_calls counter
mcp_progress_tool_calls {}

# HELP mcp_progress_tool_errors Tool calls that returned an error
# TYPE mcp_progress_tool_errors counter
mcp_progress_tool_errors {}

# HELP mcp_progress_started Progress operations started
# TYPE mcp_progress_started counter
mcp_progress_started {}

# HELP mcp_progress_completed Progress operations completed
# TYPE mcp_progress_completed counter
mcp_progress_completed {}
"#,
            s.requests_total,
            s.requests_failed,
            s.tool_calls,
            s.tool_errors,
            s.progress_started,
            s.progress_completed
        )
    }
}

/// Metrics snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub requests_failed: u64,
    pub tool_calls: u64,
    pub tool_errors: u64,
    pub progress_started: u64,
    pub progress_completed: u64,
}

impl MetricsSnapshot {
    /// Progress operations started but not yet completed.
    pub fn progress_in_flight(&self) -> u64 {
        self.progress_started.saturating_sub(self.progress_completed)
    }
}
