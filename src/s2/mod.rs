//! Semantic Scholar Graph API boundary
//!
//! The API is modeled as the [`ScholarApi`] trait so the pipeline can run
//! against the real HTTP client or an in-memory fake in tests. Wire types
//! carry `Option` fields wherever the upstream omits data; validation into
//! the pipeline's own types happens in the resolver and fetcher.

mod client;

pub use client::S2Client;

use crate::errors::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Fields requested from the author search endpoint
pub const AUTHOR_FIELDS: &str = "name,affiliations,paperCount";

/// Fields requested from the author papers endpoint
pub const PAPER_FIELDS: &str = "title,year,authors";

/// Response of `GET /author/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorSearchResponse {
    #[serde(default)]
    pub data: Vec<AuthorRecord>,
}

/// One author candidate as returned by search
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    pub author_id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub affiliations: Vec<String>,
    pub paper_count: Option<i64>,
}

/// Response of `GET /author/{id}/papers`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorPapersResponse {
    #[serde(default)]
    pub data: Vec<PaperRecord>,
}

/// One publication with its author list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperRecord {
    pub title: Option<String>,
    pub year: Option<i32>,
    #[serde(default)]
    pub authors: Vec<PaperAuthorRecord>,
}

/// Author entry on a publication; either field may be missing upstream
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperAuthorRecord {
    pub author_id: Option<String>,
    pub name: Option<String>,
}

/// The two operations the pipeline needs from the bibliographic API.
///
/// Implementations must be Send + Sync for use across tokio tasks.
#[async_trait]
pub trait ScholarApi: Send + Sync {
    /// Search authors by free-text name, returning the top candidates.
    async fn search_author(&self, query: &str, limit: u32) -> Result<AuthorSearchResponse>;

    /// List an author's publications, bounded to a single page of `limit`.
    async fn author_publications(&self, author_id: &str, limit: u32)
        -> Result<AuthorPapersResponse>;
}
