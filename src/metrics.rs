//! # Platform Metrics
//!
//! Aggregates a sample of recent runs and the tenant queue counters into the
//! platform health summary shown on the dashboard.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::metrics::{
    HEALTHY_SUCCESS_RATE, QUEUE_DEPTH_WARNING, THROUGHPUT_WINDOW_SECS, WARNING_SUCCESS_RATE,
};
use crate::models::orchestrator::{QueueTotals, RawRunSummary};
use crate::models::run::RunStatus;
use crate::transform::parse_timestamp;
use crate::transform::utils::format_minutes_seconds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn for_success_rate(rate: f64) -> Self {
        if rate >= HEALTHY_SUCCESS_RATE {
            Self::Healthy
        } else if rate >= WARNING_SUCCESS_RATE {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub fn for_queue_depth(depth: u64) -> Self {
        if depth > QUEUE_DEPTH_WARNING {
            Self::Warning
        } else {
            Self::Healthy
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessRate {
    /// Percent, one decimal place
    pub value: f64,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    pub value: usize,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueDepth {
    pub value: u64,
    pub pending: u64,
    pub queued: u64,
    pub running: u64,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageDuration {
    /// Whole seconds
    pub value: i64,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMetrics {
    pub success_rate: SuccessRate,
    pub throughput: Throughput,
    pub queue_depth: QueueDepth,
    pub avg_duration: AverageDuration,
    pub last_updated: DateTime<Utc>,
}

/// Summarize `runs` (typically the most recent hundred) and `queue` as of `now`
pub fn compute_platform_metrics(
    runs: &[RawRunSummary],
    queue: QueueTotals,
    now: DateTime<Utc>,
) -> PlatformMetrics {
    let total = runs.len();
    let succeeded = runs.iter().filter(|r| r.status.is_success()).count();
    let failed = runs
        .iter()
        .filter(|r| r.status == RunStatus::Failed)
        .count();
    let rate = if total > 0 {
        succeeded as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    // (started, finished) for runs that carry both timestamps
    let finished: Vec<(DateTime<Utc>, DateTime<Utc>)> = runs
        .iter()
        .filter_map(|r| {
            Some((
                parse_timestamp(r.started_at.as_deref())?,
                parse_timestamp(r.finished_at.as_deref())?,
            ))
        })
        .collect();

    let avg_ms = if finished.is_empty() {
        0.0
    } else {
        let sum: i64 = finished
            .iter()
            .map(|(start, end)| (*end - *start).num_milliseconds())
            .sum();
        sum as f64 / finished.len() as f64
    };

    let window_start = now - Duration::seconds(THROUGHPUT_WINDOW_SECS);
    let recent = finished
        .iter()
        .filter(|(_, end)| *end >= window_start)
        .count();

    let depth = queue.num_pending + queue.num_queued;

    PlatformMetrics {
        success_rate: SuccessRate {
            value: (rate * 10.0).round() / 10.0,
            total,
            succeeded,
            failed,
            status: HealthStatus::for_success_rate(rate),
        },
        throughput: Throughput {
            value: recent,
            unit: "per hour".to_string(),
        },
        queue_depth: QueueDepth {
            value: depth,
            pending: queue.num_pending,
            queued: queue.num_queued,
            running: queue.num_running,
            status: HealthStatus::for_queue_depth(depth),
        },
        avg_duration: AverageDuration {
            value: (avg_ms / 1000.0).round() as i64,
            formatted: format_minutes_seconds(avg_ms),
        },
        last_updated: now,
    }
}
