//! Coauthorship graph builder
//!
//! Resolves a seed list of researcher names against the Semantic Scholar
//! Graph API, fetches each resolved author's publications, and writes a
//! weighted coauthorship graph as JSON for the visualization front end.

mod config;
mod errors;
mod fetcher;
mod graph;
mod pipeline;
mod resolver;
mod s2;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Build a weighted coauthorship graph for a list of researchers
#[derive(Parser, Debug)]
#[command(name = "coauthor-graph", version, about)]
struct Cli {
    /// Seed file, one researcher name per line
    #[arg(short, long, default_value = "researchers.txt")]
    input: PathBuf,

    /// Destination for the graph JSON
    #[arg(short, long, default_value = "graph.json")]
    output: PathBuf,

    /// Override the configured minimum edge weight
    #[arg(long)]
    min_edge_weight: Option<u32>,

    /// Only count publications from this year onward
    #[arg(long)]
    min_year: Option<i32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = config::AppConfig::build()?;
    if let Some(weight) = cli.min_edge_weight {
        config.pipeline.min_edge_weight = weight;
    }
    if let Some(year) = cli.min_year {
        config.pipeline.min_year = Some(year);
    }

    let seeds = pipeline::read_seed_names(&cli.input)?;
    tracing::info!(count = seeds.len(), input = %cli.input.display(), "loaded researchers");

    let api = s2::S2Client::new(config.api.clone())?;
    let graph = pipeline::run(&api, &config, &seeds).await;

    let json = serde_json::to_string_pretty(&graph)?;
    std::fs::write(&cli.output, json)?;

    tracing::info!(
        output = %cli.output.display(),
        nodes = graph.nodes.len(),
        edges = graph.links.len(),
        "graph written"
    );

    Ok(())
}
