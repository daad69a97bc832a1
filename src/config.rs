//! # Dashboard Configuration
//!
//! Layered configuration: built-in defaults, then an optional TOML file, then
//! `DASHBOARD__*` environment variables (double underscore separates nested
//! keys, e.g. `DASHBOARD__STREAM__POLL_INTERVAL_MS=500`). The orchestrator
//! token additionally falls back to `HATCHET_CLIENT_TOKEN`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::{history, metrics, stream};
use crate::error::{DashboardError, Result};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "DASHBOARD";

/// Token variable understood by the orchestrator's own SDKs
pub const TOKEN_ENV_VAR: &str = "HATCHET_CLIENT_TOKEN";

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_FILE: &str = "config/dashboard";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Address the web server binds to
    pub bind_address: String,
    pub orchestrator: OrchestratorConfig,
    pub stream: StreamConfig,
    /// Completed runs kept in the rolling history
    pub history_limit: usize,
    /// Optional JSON snapshot of the history, reloaded on start
    pub history_file: Option<PathBuf>,
    /// Recent runs sampled for platform metrics
    pub metrics_sample_size: usize,
}

/// Connection settings for the external orchestrator REST API
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub base_url: String,
    pub api_token: String,
    pub tenant_id: String,
    pub timeout_ms: u64,
    /// How far back run listings reach
    pub run_lookback_hours: i64,
}

/// Status relay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub poll_interval_ms: u64,
    pub max_not_found_retries: u32,
    pub keep_alive_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            orchestrator: OrchestratorConfig::default(),
            stream: StreamConfig::default(),
            history_limit: history::DEFAULT_HISTORY_LIMIT,
            history_file: None,
            metrics_sample_size: metrics::DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cloud.onhatchet.run".to_string(),
            api_token: String::new(),
            tenant_id: String::new(),
            timeout_ms: 30000,
            run_lookback_hours: 24,
        }
    }
}

// The token must never reach logs
impl std::fmt::Debug for OrchestratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrchestratorConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &if self.api_token.is_empty() { "" } else { "***" })
            .field("tenant_id", &self.tenant_id)
            .field("timeout_ms", &self.timeout_ms)
            .field("run_lookback_hours", &self.run_lookback_hours)
            .finish()
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: stream::DEFAULT_POLL_INTERVAL_MS,
            max_not_found_retries: stream::DEFAULT_MAX_NOT_FOUND_RETRIES,
            keep_alive_secs: stream::DEFAULT_KEEP_ALIVE_SECS,
        }
    }
}

impl StreamConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }
}

impl DashboardConfig {
    /// Load from the default file location (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE), false)
    }

    /// Load from an explicit file; `required` controls whether it must exist
    pub fn load_from(path: &Path, required: bool) -> Result<Self> {
        debug!(path = %path.display(), required, "Loading dashboard configuration");

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: DashboardConfig = settings.try_deserialize()?;

        if loaded.orchestrator.api_token.is_empty() {
            if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
                loaded.orchestrator.api_token = token;
            }
        }

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.orchestrator.api_token.trim().is_empty() {
            return Err(DashboardError::configuration(format!(
                "orchestrator api_token is not set; provide it in the config file or via {TOKEN_ENV_VAR}"
            )));
        }
        if self.orchestrator.tenant_id.trim().is_empty() {
            return Err(DashboardError::configuration(
                "orchestrator tenant_id is not set",
            ));
        }
        if self.stream.poll_interval_ms == 0 {
            return Err(DashboardError::configuration(
                "stream poll_interval_ms must be greater than zero",
            ));
        }
        if self.history_limit == 0 {
            return Err(DashboardError::configuration(
                "history_limit must be greater than zero",
            ));
        }
        if self.metrics_sample_size == 0 {
            return Err(DashboardError::configuration(
                "metrics_sample_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid() -> DashboardConfig {
        let mut config = DashboardConfig::default();
        config.orchestrator.api_token = "token".to_string();
        config.orchestrator.tenant_id = "tenant".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.stream.poll_interval_ms, 1000);
        assert_eq!(config.stream.max_not_found_retries, 5);
        assert_eq!(config.metrics_sample_size, 100);
    }

    #[test]
    fn test_validation() {
        assert!(valid().validate().is_ok());

        let mut config = valid();
        config.orchestrator.tenant_id.clear();
        assert!(matches!(
            config.validate(),
            Err(DashboardError::Configuration(_))
        ));

        let mut config = valid();
        config.stream.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.history_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
bind_address = "127.0.0.1:4000"
history_limit = 5

[orchestrator]
api_token = "file-token"
tenant_id = "tenant-1"
base_url = "http://localhost:8888"

[stream]
poll_interval_ms = 250
"#
        )
        .unwrap();

        let config = DashboardConfig::load_from(file.path(), true).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:4000");
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.orchestrator.api_token, "file-token");
        assert_eq!(config.orchestrator.base_url, "http://localhost:8888");
        assert_eq!(config.stream.poll_interval_ms, 250);
        // untouched keys keep their defaults
        assert_eq!(config.stream.max_not_found_retries, 5);
        assert_eq!(config.orchestrator.timeout_ms, 30000);
    }

    #[test]
    fn test_required_file_missing() {
        let result = DashboardConfig::load_from(Path::new("/nonexistent/dashboard.toml"), true);
        assert!(matches!(result, Err(DashboardError::Configuration(_))));
    }

    #[test]
    fn test_debug_masks_token() {
        let rendered = format!("{:?}", valid().orchestrator);
        assert!(!rendered.contains("\"token\""));
        assert!(rendered.contains("***"));
    }
}
