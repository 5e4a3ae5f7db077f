//! HTTP implementation of the Semantic Scholar API boundary

use super::{AuthorPapersResponse, AuthorSearchResponse, ScholarApi, AUTHOR_FIELDS, PAPER_FIELDS};
use crate::config::ApiConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Reqwest-backed client with per-call timeout and bounded retry.
///
/// Every GET is attempted up to `retry_attempts` times with a fixed short
/// delay in between; any transport failure, non-success status, or
/// undecodable body counts as a failed attempt. The longer escalation loop
/// for author resolution lives in the resolver, not here.
pub struct S2Client {
    client: reqwest::Client,
    config: ApiConfig,
}

impl S2Client {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let mut last_error = AppError::Decode("no attempt made".to_string());

        for attempt in 0..self.config.retry_attempts {
            match self.get_json_once(&url, endpoint, params).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    tracing::warn!(
                        endpoint,
                        attempt = attempt + 1,
                        max_attempts = self.config.retry_attempts,
                        error = %e,
                        "API request failed"
                    );
                    last_error = e;

                    if attempt + 1 < self.config.retry_attempts {
                        tokio::time::sleep(self.config.retry_delay()).await;
                    }
                }
            }
        }

        Err(last_error)
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ScholarApi for S2Client {
    async fn search_author(&self, query: &str, limit: u32) -> Result<AuthorSearchResponse> {
        self.get_json(
            "/author/search",
            &[
                ("query", query.to_string()),
                ("limit", limit.to_string()),
                ("fields", AUTHOR_FIELDS.to_string()),
            ],
        )
        .await
    }

    async fn author_publications(
        &self,
        author_id: &str,
        limit: u32,
    ) -> Result<AuthorPapersResponse> {
        self.get_json(
            &format!("/author/{author_id}/papers"),
            &[
                ("fields", PAPER_FIELDS.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }
}
