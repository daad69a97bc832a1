//! # System Constants
//!
//! Limits, defaults and wire identifiers shared by the grouping core, the
//! status relay and the web API.

/// Parallel group naming
pub mod grouping {
    /// Prefix of every synthesized parallel group name
    pub const PARALLEL_GROUP_PREFIX: &str = "parallel-";

    /// Number of grouping-key characters carried into the group name
    pub const GROUP_KEY_NAME_CHARS: usize = 8;

    /// Separator used when joining sorted prerequisite ids into a grouping key
    pub const GROUP_KEY_SEPARATOR: &str = ",";
}

/// Status relay defaults
pub mod stream {
    /// Interval between orchestrator polls for a streamed run
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

    /// Consecutive not-found responses tolerated for a freshly triggered run
    pub const DEFAULT_MAX_NOT_FOUND_RETRIES: u32 = 5;

    /// SSE keep-alive comment interval
    pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 15;
}

/// Completed run history defaults
pub mod history {
    /// Number of completed runs kept in the rolling cache
    pub const DEFAULT_HISTORY_LIMIT: usize = 20;
}

/// Platform health thresholds
pub mod metrics {
    /// Runs sampled when aggregating platform metrics
    pub const DEFAULT_SAMPLE_SIZE: usize = 100;

    /// Success rate (percent) at or above which the platform is healthy
    pub const HEALTHY_SUCCESS_RATE: f64 = 90.0;

    /// Success rate (percent) at or above which the platform is only degraded
    pub const WARNING_SUCCESS_RATE: f64 = 75.0;

    /// Queue depth above which the queue is flagged
    pub const QUEUE_DEPTH_WARNING: u64 = 20;

    /// Window used for the throughput figure
    pub const THROUGHPUT_WINDOW_SECS: i64 = 60 * 60;
}

/// Fallback labels used when the orchestrator omits display fields
pub mod labels {
    pub const UNKNOWN_WORKFLOW: &str = "Unknown workflow";
    pub const UNKNOWN: &str = "Unknown";
}
