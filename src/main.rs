use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use cryptograph_rs::config::Settings;
use cryptograph_rs::export;
use cryptograph_rs::graph::{self, Category, Graph};
use cryptograph_rs::market_data::adapters::{self, CoinGeckoSource, JsonFileSource, MarketSource};
use cryptograph_rs::telemetry;

const MARKETS_FILE: &str = "markets.json";

#[derive(Debug, Parser)]
#[command(name = "cryptograph", version, about = "Build a project/exchange/wallet/community affinity graph")]
struct Cli {
    /// Config file (toml/yaml/json); defaults to ./cryptograph.* when present
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read markets from a saved JSON array instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,
    /// RNG seed for reproducible edges
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[arg(long)]
    max_pages: Option<u32>,
    /// Also write the raw markets to <out_dir>/markets.json
    #[arg(long)]
    save_markets: bool,
    #[arg(long, default_value = "info")]
    log: String,
}

// Helper to print the category breakdown of the built graph
fn print_summary(graph: &Graph, seed: u64) {
    let categories: BTreeMap<Category, usize> =
        graph.projects().map(|p| p.category).counts().into_iter().collect();

    println!("\n=== Graph Summary ===");
    println!("Seed: {}", seed);
    println!("Nodes: {}, Edges: {}", graph.node_count(), graph.edge_count());
    for (category, n) in &categories {
        println!("  {:<8} {}", category, n);
    }
    println!("=====================\n");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.log);
    telemetry::init_metrics()?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = cli.out_dir {
        settings.output.dir = dir;
    }
    if let Some(pages) = cli.max_pages {
        settings.fetch.max_pages = pages;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    let coins = match &cli.input {
        Some(path) => JsonFileSource::new(path).fetch_markets().await?,
        None => CoinGeckoSource::new(&settings.fetch).fetch_markets().await?,
    };
    info!(coins = coins.len(), "Total coins loaded");

    std::fs::create_dir_all(&settings.output.dir)
        .with_context(|| format!("cannot create {}", settings.output.dir.display()))?;
    if cli.save_markets {
        let path = settings.output.dir.join(MARKETS_FILE);
        export::snapshot::save_markets(&path, &coins)?;
        info!(path = %path.display(), "Saved raw markets");
    }

    let records = adapters::to_records(coins)?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    info!(seed, "Seeding edge synthesis");
    let mut rng = StdRng::seed_from_u64(seed);
    let graph = graph::build(&records, &mut rng)?;

    let paths = export::write_all(&graph, &settings.output.dir)?;
    print_summary(&graph, seed);
    println!("Wrote {}, {} and {}", paths.nodes.display(), paths.edges.display(), paths.dot.display());
    println!("Done. Output folder: {}", settings.output.dir.display());
    Ok(())
}
