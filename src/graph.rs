//! Coauthorship graph accumulation and finalization
//!
//! `GraphBuilder` owns all mutable aggregation state for a run. Edges are
//! keyed by a canonical unordered id pair so both reporting directions land
//! on the same counter; nodes and edges keep insertion order so a run's
//! output is stable given the same ingest sequence.

use crate::fetcher::Publication;
use crate::resolver::AuthorIdentity;
use serde::Serialize;
use std::collections::HashMap;

/// Node role in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Seed,
    Coauthor,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub affiliations: Vec<String>,
    pub paper_count: Option<i64>,
    pub degree: usize,
}

/// Undirected edge in the final output; `source`/`target`/`weight` names are
/// a compatibility contract with the visualization front end.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

/// Final immutable snapshot; every node is an endpoint of some link and
/// every link endpoint has a node entry.
#[derive(Debug, Clone, Serialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Edge>,
}

/// Canonical unordered pair of author ids, smaller id first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EdgeKey {
    a: String,
    b: String,
}

impl EdgeKey {
    /// Returns `None` for a self-loop.
    fn new(u: &str, v: &str) -> Option<Self> {
        match u.cmp(v) {
            std::cmp::Ordering::Less => Some(Self {
                a: u.to_string(),
                b: v.to_string(),
            }),
            std::cmp::Ordering::Greater => Some(Self {
                a: v.to_string(),
                b: u.to_string(),
            }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone)]
struct NodeMeta {
    name: String,
    kind: NodeKind,
    affiliations: Vec<String>,
    paper_count: Option<i64>,
}

/// Accumulates nodes and weighted edges from (identity, publications) pairs.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: HashMap<String, NodeMeta>,
    node_order: Vec<String>,
    weights: HashMap<EdgeKey, u32>,
    edge_order: Vec<EdgeKey>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one seed author's publication page into the graph state.
    ///
    /// Each publication increments the (seed, co-author) pair counter once
    /// per distinct co-author entry, so weight counts collaboration events
    /// from the seed cohort's perspective.
    pub fn ingest(&mut self, seed: &AuthorIdentity, publications: &[Publication]) {
        self.register_seed(seed);

        for publication in publications {
            for co_author in &publication.co_authors {
                self.register_coauthor(&co_author.id, &co_author.name);

                if co_author.id != seed.id {
                    self.increment_edge(&seed.id, &co_author.id);
                }
            }
        }
    }

    /// Seed identity is authoritative: an id first seen as a coauthor is
    /// upgraded, including the richer search metadata.
    fn register_seed(&mut self, seed: &AuthorIdentity) {
        let meta = NodeMeta {
            name: seed.display_name.clone(),
            kind: NodeKind::Seed,
            affiliations: seed.affiliations.clone(),
            paper_count: seed.paper_count,
        };

        match self.nodes.get_mut(&seed.id) {
            Some(existing) => *existing = meta,
            None => {
                self.nodes.insert(seed.id.clone(), meta);
                self.node_order.push(seed.id.clone());
            }
        }
    }

    /// First observation wins for coauthors; never demotes a seed node.
    fn register_coauthor(&mut self, id: &str, name: &str) {
        if self.nodes.contains_key(id) {
            return;
        }

        self.nodes.insert(
            id.to_string(),
            NodeMeta {
                name: name.to_string(),
                kind: NodeKind::Coauthor,
                affiliations: Vec::new(),
                paper_count: None,
            },
        );
        self.node_order.push(id.to_string());
    }

    fn increment_edge(&mut self, u: &str, v: &str) {
        let Some(key) = EdgeKey::new(u, v) else {
            return;
        };

        match self.weights.get_mut(&key) {
            Some(weight) => *weight += 1,
            None => {
                self.weights.insert(key.clone(), 1);
                self.edge_order.push(key);
            }
        }
    }

    /// Produces the final snapshot: edges below `min_edge_weight` dropped,
    /// nodes without a surviving edge pruned, degree filled in.
    pub fn finalize(&self, min_edge_weight: u32) -> Graph {
        let mut links = Vec::new();
        let mut degree: HashMap<&str, usize> = HashMap::new();

        for key in &self.edge_order {
            let weight = self.weights[key];
            if weight < min_edge_weight {
                continue;
            }

            *degree.entry(key.a.as_str()).or_default() += 1;
            *degree.entry(key.b.as_str()).or_default() += 1;
            links.push(Edge {
                source: key.a.clone(),
                target: key.b.clone(),
                weight,
            });
        }

        let nodes = self
            .node_order
            .iter()
            .filter_map(|id| {
                let node_degree = *degree.get(id.as_str())?;
                let meta = &self.nodes[id];
                Some(Node {
                    id: id.clone(),
                    name: meta.name.clone(),
                    kind: meta.kind,
                    affiliations: meta.affiliations.clone(),
                    paper_count: meta.paper_count,
                    degree: node_degree,
                })
            })
            .collect();

        Graph { nodes, links }
    }
}
