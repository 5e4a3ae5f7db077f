//! Configuration for the graph build pipeline
//!
//! Defaults mirror the values the visualization consumer was tuned against;
//! every field can be overridden through environment variables prefixed with
//! `APP` (e.g. `APP_PIPELINE__MIN_EDGE_WEIGHT=3`).

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Semantic Scholar Graph API base URL
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Minimum delay between successive outgoing API calls (milliseconds).
    /// Shared across the whole pipeline, not per worker.
    pub request_delay_ms: u64,

    /// Delay between the immediate retry attempts of a single call
    pub retry_delay_ms: u64,

    /// Longer delay between the escalation rounds of author resolution
    pub escalation_delay_ms: u64,

    /// Attempts per call at the transport level
    pub retry_attempts: u32,

    /// Additional resolution rounds after the first call has failed
    pub escalation_rounds: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Publications fetched per author. Single page only; raising this trades
    /// latency and API quota for completeness.
    pub max_papers_per_author: u32,

    /// Edges below this accumulated weight are dropped at finalize
    pub min_edge_weight: u32,

    /// When set, publications with a known year older than this are skipped
    #[serde(default)]
    pub min_year: Option<i32>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn escalation_delay(&self) -> Duration {
        Duration::from_millis(self.escalation_delay_ms)
    }
}

impl AppConfig {
    pub fn build() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api.base_url", "https://api.semanticscholar.org/graph/v1")?
            .set_default("api.timeout_secs", 30)?
            .set_default("api.request_delay_ms", 800)?
            .set_default("api.retry_delay_ms", 1500)?
            .set_default("api.escalation_delay_ms", 3000)?
            .set_default("api.retry_attempts", 3)?
            .set_default("api.escalation_rounds", 3)?
            .set_default("pipeline.max_papers_per_author", 60)?
            .set_default("pipeline.min_edge_weight", 2)?
            // E.g. `APP_API__REQUEST_DELAY_MS=1000` sets `ApiConfig.request_delay_ms`
            .add_source(Environment::default().separator("__").prefix("APP"));

        builder.build()?.try_deserialize()
    }
}
