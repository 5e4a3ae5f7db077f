//! Fetches publications and validates their co-author lists

use crate::config::PipelineConfig;
use crate::s2::{PaperRecord, ScholarApi};

/// One publication, reduced to what the aggregator consumes
#[derive(Debug, Clone)]
pub struct Publication {
    pub year: Option<i32>,
    pub co_authors: Vec<CoAuthor>,
}

/// Validated co-author entry; id and name are never empty
#[derive(Debug, Clone)]
pub struct CoAuthor {
    pub id: String,
    pub name: String,
}

/// Retrieves a single bounded page of an author's publications.
///
/// Missing publications for one author must never abort the pipeline for the
/// others, so any failure of the underlying call (which already retries)
/// degrades to an empty list with a warning. Wire records are validated here:
/// co-author entries without a usable id and name are dropped, and the
/// optional minimum-year filter is applied, before anything reaches the
/// aggregator.
pub struct PublicationFetcher<'a> {
    api: &'a dyn ScholarApi,
    config: &'a PipelineConfig,
}

impl<'a> PublicationFetcher<'a> {
    pub fn new(api: &'a dyn ScholarApi, config: &'a PipelineConfig) -> Self {
        Self { api, config }
    }

    pub async fn fetch(&self, author_id: &str) -> Vec<Publication> {
        let response = match self
            .api
            .author_publications(author_id, self.config.max_papers_per_author)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(author_id, error = %e, "publication fetch failed, skipping author");
                return Vec::new();
            }
        };

        response
            .data
            .into_iter()
            .filter(|paper| self.passes_year_filter(paper.year))
            .map(Self::into_publication)
            .collect()
    }

    /// Unknown years are never excludable.
    fn passes_year_filter(&self, year: Option<i32>) -> bool {
        match (self.config.min_year, year) {
            (Some(min), Some(year)) => year >= min,
            _ => true,
        }
    }

    fn into_publication(record: PaperRecord) -> Publication {
        let co_authors = record
            .authors
            .into_iter()
            .filter_map(|author| match (author.author_id, author.name) {
                (Some(id), Some(name)) if !id.is_empty() && !name.is_empty() => {
                    Some(CoAuthor { id, name })
                }
                _ => None,
            })
            .collect();

        Publication {
            year: record.year,
            co_authors,
        }
    }
}
