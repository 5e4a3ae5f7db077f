//! Resolves free-text researcher names to canonical author identities

use crate::config::ApiConfig;
use crate::s2::{AuthorRecord, ScholarApi};

/// Canonical identity of a resolved seed researcher
#[derive(Debug, Clone)]
pub struct AuthorIdentity {
    pub id: String,
    pub display_name: String,
    pub affiliations: Vec<String>,
    pub paper_count: Option<i64>,
}

/// Maps a seed name to the top-ranked author candidate.
///
/// A well-formed empty result set is a valid "no match" outcome, reported as
/// `None`. Transient failures of the underlying call (which already retries
/// a few times with a short delay) escalate into further rounds separated by
/// a longer delay, patience for a rate-limited upstream; only after those are
/// exhausted does the name count as unresolved.
pub struct IdentityResolver<'a> {
    api: &'a dyn ScholarApi,
    config: &'a ApiConfig,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(api: &'a dyn ScholarApi, config: &'a ApiConfig) -> Self {
        Self { api, config }
    }

    pub async fn resolve(&self, name: &str) -> Option<AuthorIdentity> {
        let mut result = self.api.search_author(name, 1).await;

        let mut round = 0;
        while result.is_err() && round < self.config.escalation_rounds {
            round += 1;
            tokio::time::sleep(self.config.escalation_delay()).await;
            tracing::info!(name, round, "retrying author search after backoff");
            result = self.api.search_author(name, 1).await;
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(name, error = %e, "author search gave up");
                return None;
            }
        };

        response
            .data
            .into_iter()
            .next()
            .and_then(|top| Self::into_identity(top, name))
    }

    /// A candidate without an author id is unusable; a missing display name
    /// falls back to the query string.
    fn into_identity(record: AuthorRecord, query: &str) -> Option<AuthorIdentity> {
        let id = record.author_id.filter(|id| !id.is_empty())?;

        Some(AuthorIdentity {
            id,
            display_name: record.name.unwrap_or_else(|| query.to_string()),
            affiliations: record.affiliations,
            paper_count: record.paper_count,
        })
    }
}
