//! Operation timing and anomaly reporting
//!
//! Every operation boundary goes through [`timed`], which logs the outcome
//! with its duration and flags it when it runs past its latency threshold.
//! Size anomalies are reported by [`check_result_size`] and [`check_total`].
//! None of these change the result they observe.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};

/// Operations observed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Whole ingestion: upstream call plus insert loop
    FetchUsers,
    /// A single row insert inside an ingestion
    InsertUser,
    ListUsers,
    CountUsers,
    TriggerFailure,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FetchUsers => "fetch_users",
            Operation::InsertUser => "insert_user",
            Operation::ListUsers => "list_users",
            Operation::CountUsers => "count_users",
            Operation::TriggerFailure => "trigger_failure",
        }
    }

    /// Per-row operations log at debug level; a failure is reported by the
    /// enclosing operation
    fn is_per_row(self) -> bool {
        matches!(self, Operation::InsertUser)
    }
}

/// Anomaly thresholds. Breaching one only produces a warning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Thresholds {
    #[serde(default = "default_slow_insert_ms")]
    pub slow_insert_ms: u64,

    /// Applies to a whole ingestion, upstream call included
    #[serde(default = "default_slow_fetch_ms")]
    pub slow_fetch_ms: u64,

    #[serde(default = "default_slow_query_ms")]
    pub slow_query_ms: u64,

    #[serde(default = "default_large_result_rows")]
    pub large_result_rows: usize,

    #[serde(default = "default_high_count")]
    pub high_count: i64,
}

impl Thresholds {
    /// Latency above which `op` is reported as slow
    pub fn latency_limit(&self, op: Operation) -> Option<Duration> {
        let ms = match op {
            Operation::InsertUser => self.slow_insert_ms,
            Operation::FetchUsers => self.slow_fetch_ms,
            Operation::ListUsers | Operation::CountUsers => self.slow_query_ms,
            Operation::TriggerFailure => return None,
        };
        Some(Duration::from_millis(ms))
    }

    pub fn is_slow(&self, op: Operation, elapsed: Duration) -> bool {
        self.latency_limit(op).is_some_and(|limit| elapsed > limit)
    }

    pub fn is_large_result(&self, rows: usize) -> bool {
        rows > self.large_result_rows
    }

    pub fn is_high_count(&self, total: i64) -> bool {
        total > self.high_count
    }
}

fn default_slow_insert_ms() -> u64 {
    1000
}

fn default_slow_fetch_ms() -> u64 {
    5000
}

fn default_slow_query_ms() -> u64 {
    2000
}

fn default_large_result_rows() -> usize {
    1000
}

fn default_high_count() -> i64 {
    10_000
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            slow_insert_ms: default_slow_insert_ms(),
            slow_fetch_ms: default_slow_fetch_ms(),
            slow_query_ms: default_slow_query_ms(),
            large_result_rows: default_large_result_rows(),
            high_count: default_high_count(),
        }
    }
}

/// Await `fut`, log its outcome and duration, and warn if it was slow.
///
/// This is where failures get their single error-level log line. The result
/// is returned untouched.
pub async fn timed<T, E, F>(op: Operation, thresholds: &Thresholds, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let started = Instant::now();
    let result = fut.await;
    let elapsed = started.elapsed();
    let duration_ms = elapsed.as_millis() as u64;

    match &result {
        Ok(_) if op.is_per_row() => {
            tracing::debug!(operation = op.as_str(), duration_ms, "Operation completed");
        }
        Err(e) if op.is_per_row() => {
            tracing::debug!(operation = op.as_str(), duration_ms, error = %e, "Operation failed");
        }
        Ok(_) => {
            tracing::info!(operation = op.as_str(), duration_ms, "Operation completed");
        }
        Err(e) => {
            tracing::error!(
                operation = op.as_str(),
                duration_ms,
                error = %e,
                "Operation failed"
            );
        }
    }

    if thresholds.is_slow(op, elapsed) {
        tracing::warn!(
            operation = op.as_str(),
            duration_ms,
            threshold_ms = thresholds.latency_limit(op).map_or(0, |d| d.as_millis() as u64),
            "Slow operation"
        );
    }

    result
}

/// Warn when a listing returns more rows than expected
pub fn check_result_size(thresholds: &Thresholds, op: Operation, rows: usize) {
    if thresholds.is_large_result(rows) {
        tracing::warn!(
            operation = op.as_str(),
            rows,
            threshold = thresholds.large_result_rows,
            "Large result set"
        );
    }
}

/// Warn when the stored total passes the high-water mark
pub fn check_total(thresholds: &Thresholds, total: i64) {
    if thresholds.is_high_count(total) {
        tracing::warn!(
            operation = Operation::CountUsers.as_str(),
            total,
            threshold = thresholds.high_count,
            "High user count"
        );
    }
}
