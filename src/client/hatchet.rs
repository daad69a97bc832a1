//! # Hatchet REST Client
//!
//! Typed HTTP client for the orchestrator's tenant-scoped REST API.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::client::WorkflowApi;
use crate::config::OrchestratorConfig;
use crate::error::{DashboardError, Result};
use crate::logging::log_orchestrator_request;
use crate::models::orchestrator::{
    QueueTotals, RawQueueMetrics, RawRunDetails, RawRunList, RawRunSummary,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerRequest<'a> {
    workflow_name: &'a str,
    input: serde_json::Value,
}

/// REST client for the external orchestrator
#[derive(Clone)]
pub struct HatchetClient {
    client: Client,
    config: OrchestratorConfig,
    base_url: Url,
}

impl std::fmt::Debug for HatchetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HatchetClient")
            .field("base_url", &self.base_url.as_str())
            .field("tenant_id", &self.config.tenant_id)
            .field("timeout_ms", &self.config.timeout_ms)
            .finish()
    }
}

impl HatchetClient {
    /// Create a client with bearer-token auth and the configured timeout
    pub fn new(config: OrchestratorConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DashboardError::configuration(format!("Invalid orchestrator base URL: {e}"))
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", config.api_token)
                .parse()
                .map_err(|e| DashboardError::configuration(format!("Invalid api token: {e}")))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("run-dashboard/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL extended by `segments`, each percent-encoded as exactly one
    /// path component
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DashboardError::configuration("Orchestrator base URL cannot carry a path")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn tenant_url(&self, suffix: &[&str]) -> Result<Url> {
        let mut segments = vec!["api", "v1", "stable", "tenants", self.config.tenant_id.as_str()];
        segments.extend_from_slice(suffix);
        self.url(&segments)
    }

    /// Run URL for a caller-supplied id. Ids that would vanish from or
    /// rewrite the path are rejected.
    fn run_url(&self, run_id: &str) -> Result<Url> {
        if matches!(run_id.trim(), "" | "." | "..") {
            return Err(DashboardError::invalid_input(format!(
                "Invalid workflow run id: {run_id:?}"
            )));
        }
        self.url(&["api", "v1", "stable", "workflow-runs", run_id])
    }

    async fn handle_response<T>(&self, response: reqwest::Response, operation: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            let parsed = serde_json::from_slice::<T>(&body)?;
            debug!("Successfully completed operation: {}", operation);
            Ok(parsed)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Failed operation: {}", operation);
            Err(DashboardError::api(status.as_u16(), error_text))
        }
    }
}

#[async_trait]
impl WorkflowApi for HatchetClient {
    /// GET /api/v1/stable/workflow-runs/{run_id}
    async fn get_run(&self, run_id: &str) -> Result<RawRunDetails> {
        let url = self.run_url(run_id)?;
        let started = Instant::now();

        let response = self.client.get(url).send().await?;
        let result = self.handle_response(response, "get workflow run").await;

        log_orchestrator_request(
            "get_run",
            Some(run_id),
            if result.is_ok() { "ok" } else { "error" },
            Some(started.elapsed().as_millis() as u64),
            None,
        );
        result
    }

    /// GET /api/v1/stable/tenants/{tenant}/workflow-runs
    async fn list_runs(&self, limit: usize) -> Result<Vec<RawRunSummary>> {
        let mut url = self.tenant_url(&["workflow-runs"])?;
        let since = Utc::now() - ChronoDuration::hours(self.config.run_lookback_hours);
        url.query_pairs_mut()
            .append_pair("since", &since.to_rfc3339())
            .append_pair("limit", &limit.to_string())
            .append_pair("only_tasks", "false");

        debug!(url = %url, "Listing workflow runs");
        let response = self.client.get(url).send().await?;
        let list: RawRunList = self.handle_response(response, "list workflow runs").await?;
        Ok(list.rows)
    }

    /// GET /api/v1/tenants/{tenant}/queue-metrics
    async fn queue_metrics(&self) -> Result<QueueTotals> {
        let url = self.url(&[
            "api",
            "v1",
            "tenants",
            self.config.tenant_id.as_str(),
            "queue-metrics",
        ])?;
        let response = self.client.get(url).send().await?;
        let metrics: RawQueueMetrics = self.handle_response(response, "get queue metrics").await?;
        Ok(metrics.total.unwrap_or_default())
    }

    /// POST /api/v1/stable/tenants/{tenant}/workflow-runs/trigger
    async fn trigger_workflow(
        &self,
        workflow_name: &str,
        input: serde_json::Value,
    ) -> Result<String> {
        let url = self.tenant_url(&["workflow-runs", "trigger"])?;
        let body = TriggerRequest {
            workflow_name,
            input,
        };

        let response = self.client.post(url).json(&body).send().await?;
        let details: RawRunDetails = self.handle_response(response, "trigger workflow").await?;

        let run_id = details.run_id();
        if run_id.is_empty() {
            return Err(DashboardError::api(
                502,
                "trigger response did not include a run id",
            ));
        }

        log_orchestrator_request("trigger_workflow", Some(run_id), "ok", None, Some(workflow_name));
        Ok(run_id.to_string())
    }
}
