//! Orchestrates resolution, fetching, and aggregation for a seed list

use crate::config::AppConfig;
use crate::errors::Result;
use crate::fetcher::PublicationFetcher;
use crate::graph::{Graph, GraphBuilder};
use crate::resolver::{AuthorIdentity, IdentityResolver};
use crate::s2::ScholarApi;
use governor::{
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::path::Path;

/// Global pacing for outgoing API calls.
///
/// One token per `request_delay` period, shared by every caller, so the
/// upstream rate limit is honored per call no matter how the pipeline is
/// driven. A zero delay disables pacing (used by tests).
pub struct Pacer {
    limiter: Option<RateLimiter<NotKeyed, InMemoryState, QuantaClock>>,
}

impl Pacer {
    pub fn new(period: std::time::Duration) -> Self {
        Self {
            limiter: Quota::with_period(period).map(RateLimiter::direct),
        }
    }

    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

/// Reads seed researcher names, one per line, skipping blank lines.
pub fn read_seed_names(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Runs the full pipeline: resolve every seed name, fetch each resolved
/// author's publications, and aggregate them into the final graph.
pub async fn run(api: &dyn ScholarApi, config: &AppConfig, seeds: &[String]) -> Graph {
    let pacer = Pacer::new(config.api.request_delay());
    let resolver = IdentityResolver::new(api, &config.api);
    let fetcher = PublicationFetcher::new(api, &config.pipeline);

    tracing::info!(count = seeds.len(), "resolving author identities");
    let mut identities: Vec<AuthorIdentity> = Vec::new();
    for name in seeds {
        pacer.wait().await;
        match resolver.resolve(name).await {
            Some(identity) => {
                tracing::debug!(name = %name, author_id = %identity.id, "resolved");
                identities.push(identity);
            }
            None => tracing::warn!(name = %name, "could not resolve author, skipping"),
        }
    }
    tracing::info!(
        resolved = identities.len(),
        total = seeds.len(),
        "identity resolution finished"
    );

    tracing::info!("fetching publications and building edges");
    let mut builder = GraphBuilder::new();
    for identity in &identities {
        pacer.wait().await;
        let publications = fetcher.fetch(&identity.id).await;
        builder.ingest(identity, &publications);
    }

    builder.finalize(config.pipeline.min_edge_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::s2::{
        AuthorPapersResponse, AuthorRecord, AuthorSearchResponse, PaperAuthorRecord, PaperRecord,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io::Write;

    /// In-memory API: a fixed name -> id mapping and id -> papers mapping.
    struct FakeApi {
        authors: HashMap<String, AuthorRecord>,
        papers: HashMap<String, Vec<PaperRecord>>,
    }

    #[async_trait]
    impl ScholarApi for FakeApi {
        async fn search_author(&self, query: &str, _limit: u32) -> Result<AuthorSearchResponse> {
            Ok(AuthorSearchResponse {
                data: self.authors.get(query).cloned().into_iter().collect(),
            })
        }

        async fn author_publications(
            &self,
            author_id: &str,
            _limit: u32,
        ) -> Result<AuthorPapersResponse> {
            Ok(AuthorPapersResponse {
                data: self.papers.get(author_id).cloned().unwrap_or_default(),
            })
        }
    }

    fn test_config() -> AppConfig {
        let mut config = AppConfig::build().expect("default config");
        config.api.request_delay_ms = 0;
        config.api.retry_delay_ms = 0;
        config.api.escalation_delay_ms = 0;
        config.pipeline.min_edge_weight = 1;
        config
    }

    fn author_record(id: &str, name: &str) -> AuthorRecord {
        AuthorRecord {
            author_id: Some(id.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn paper(authors: &[(&str, &str)]) -> PaperRecord {
        PaperRecord {
            title: None,
            year: Some(2024),
            authors: authors
                .iter()
                .map(|(id, name)| PaperAuthorRecord {
                    author_id: Some(id.to_string()),
                    name: Some(name.to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn seed_file_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Ada Lovelace\n\n  \nGrace Hopper\n").unwrap();

        let names = read_seed_names(file.path()).unwrap();
        assert_eq!(names, vec!["Ada Lovelace", "Grace Hopper"]);
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        assert!(read_seed_names(Path::new("/nonexistent/researchers.txt")).is_err());
    }

    #[tokio::test]
    async fn unresolved_seeds_are_excluded_from_the_graph() {
        let api = FakeApi {
            authors: HashMap::from([("Ada".to_string(), author_record("a", "Ada"))]),
            papers: HashMap::from([(
                "a".to_string(),
                vec![paper(&[("a", "Ada"), ("b", "Bob")])],
            )]),
        };

        let seeds = vec!["Ada".to_string(), "Nonexistent Person XYZ123".to_string()];
        let graph = run(&api, &test_config(), &seeds).await;

        assert_eq!(graph.links.len(), 1);
        assert!(graph.nodes.iter().all(|n| n.id != "Nonexistent Person XYZ123"));
    }

    #[tokio::test]
    async fn end_to_end_aggregation() {
        let api = FakeApi {
            authors: HashMap::from([
                ("Ada".to_string(), author_record("a", "Ada")),
                ("Bob".to_string(), author_record("b", "Bob")),
            ]),
            papers: HashMap::from([
                (
                    "a".to_string(),
                    vec![
                        paper(&[("a", "Ada"), ("b", "Bob")]),
                        paper(&[("a", "Ada"), ("b", "Bob"), ("c", "Carol")]),
                    ],
                ),
                (
                    "b".to_string(),
                    vec![
                        paper(&[("b", "Bob"), ("c", "Carol")]),
                        paper(&[("b", "Bob"), ("c", "Carol")]),
                    ],
                ),
            ]),
        };

        let mut config = test_config();
        config.pipeline.min_edge_weight = 2;
        let graph = run(&api, &config, &["Ada".to_string(), "Bob".to_string()]).await;

        // (a,b) accumulated twice from Ada's page, (b,c) twice from Bob's;
        // (a,c) only once, so the threshold drops it
        assert_eq!(graph.links.len(), 2);
        assert!(graph
            .links
            .iter()
            .any(|e| e.source == "a" && e.target == "b" && e.weight == 2));
        assert!(graph
            .links
            .iter()
            .any(|e| e.source == "b" && e.target == "c" && e.weight == 2));
        assert!(graph.nodes.iter().all(|n| n.id != "unrelated"));
    }
}
