use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument, trace};

use crate::graph::classifier::classify_project;
use crate::graph::types::{
    Graph, GraphError, GraphResult, Node, NodeKey, NodeType, ProjectNode, ProjectRecord,
};
use crate::market_data::normaliser::normalize;

pub const EXCHANGES: [&str; 7] = ["Binance", "Coinbase", "Kraken", "KuCoin", "Gate", "Bitfinex", "OKX"];
pub const WALLETS: [&str; 4] = ["MetaMask", "TrustWallet", "Ledger", "Trezor"];

pub const EXCHANGE_BASE_PROBABILITY: f64 = 0.05;
pub const EXCHANGE_MAX_PROBABILITY: f64 = 0.95;
pub const EXCHANGE_WEIGHT: f64 = 1.0;
pub const WALLET_WEIGHT: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    Always,
    Chance(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommunityRule {
    pub name: &'static str,
    pub presence: Presence,
    pub weight: f64,
}

// Fixed rates, independent of a project's metrics. Evaluated in this order.
pub const COMMUNITY_RULES: [CommunityRule; 4] = [
    CommunityRule { name: "Twitter", presence: Presence::Always, weight: 0.9 },
    CommunityRule { name: "Discord", presence: Presence::Chance(0.5), weight: 0.6 },
    CommunityRule { name: "Reddit", presence: Presence::Chance(0.3), weight: 0.4 },
    CommunityRule { name: "Telegram", presence: Presence::Chance(0.2), weight: 0.3 },
];

/// Number of fixed infrastructure nodes every graph starts with.
pub const INFRASTRUCTURE_NODES: usize = EXCHANGES.len() + WALLETS.len() + COMMUNITY_RULES.len();

/// Build the affinity graph for a batch of projects, drawing all randomness from `rng`.
pub fn build<R: Rng + ?Sized>(projects: &[ProjectRecord], rng: &mut R) -> GraphResult<Graph> {
    GraphBuilder::new(rng).build(projects)
}

/// Single-pass graph construction. Owns the graph being built and borrows the RNG,
/// so the same seed and input order always reproduce the same graph.
pub struct GraphBuilder<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    graph: Graph,
}

impl<'r, R: Rng + ?Sized> GraphBuilder<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        Self { rng, graph: Graph::new() }
    }

    #[instrument(skip_all, fields(projects = projects.len()))]
    pub fn build(mut self, projects: &[ProjectRecord]) -> GraphResult<Graph> {
        validate(projects)?;
        self.add_infrastructure();

        let market_caps: Vec<f64> = projects.iter().map(ProjectRecord::market_cap_or_zero).collect();
        let volumes: Vec<f64> = projects.iter().map(ProjectRecord::volume_or_zero).collect();
        let mc_norm = normalize(&market_caps);
        let vol_norm = normalize(&volumes);

        for (i, record) in projects.iter().enumerate() {
            self.add_project(record, mc_norm[i], vol_norm[i])?;
        }

        record_metrics(&self.graph);
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "Graph built"
        );
        Ok(self.graph)
    }

    fn add_infrastructure(&mut self) {
        for name in EXCHANGES {
            self.graph.add_node(Node::Exchange { name: name.to_string() });
        }
        for name in WALLETS {
            self.graph.add_node(Node::Wallet { name: name.to_string() });
        }
        for rule in &COMMUNITY_RULES {
            self.graph.add_node(Node::Community { name: rule.name.to_string() });
        }
        trace!(count = INFRASTRUCTURE_NODES, "Added infrastructure nodes");
    }

    fn add_project(&mut self, record: &ProjectRecord, mc: f64, vol: f64) -> GraphResult<()> {
        let category = classify_project(Some(record.name.as_str()), Some(record.symbol.as_str()));
        let key = NodeKey::project(&record.id);
        self.graph.add_node(Node::Project(ProjectNode {
            id: record.id.clone(),
            name: record.name.clone(),
            symbol: record.symbol.clone(),
            price: record.price,
            market_cap: record.market_cap_or_zero(),
            volume: record.volume_or_zero(),
            category,
        }));

        let exchanges = self.link_exchanges(&key, mc)?;
        let wallets = self.link_wallets(&key, mc, vol)?;
        let communities = self.link_communities(&key)?;
        debug!(
            id = %record.id,
            %category,
            mc_norm = mc,
            vol_norm = vol,
            exchanges,
            wallets,
            communities,
            "Linked project"
        );
        Ok(())
    }

    // One independent Bernoulli trial per exchange.
    fn link_exchanges(&mut self, key: &NodeKey, mc: f64) -> GraphResult<usize> {
        let p = (EXCHANGE_BASE_PROBABILITY + mc).min(EXCHANGE_MAX_PROBABILITY);
        let weight = EXCHANGE_WEIGHT * (0.5 + mc);
        let mut linked = 0;
        for name in EXCHANGES {
            if self.rng.gen::<f64>() < p {
                self.graph.add_edge(key, &NodeKey::exchange(name), weight)?;
                linked += 1;
            }
        }
        Ok(linked)
    }

    // Count follows market cap, weight follows volume.
    fn link_wallets(&mut self, key: &NodeKey, mc: f64, vol: f64) -> GraphResult<usize> {
        let count = wallet_count(mc);
        let weight = WALLET_WEIGHT * (0.5 + vol);
        let chosen: Vec<&str> = WALLETS.choose_multiple(&mut *self.rng, count).copied().collect();
        for name in &chosen {
            self.graph.add_edge(key, &NodeKey::wallet(*name), weight)?;
        }
        Ok(chosen.len())
    }

    fn link_communities(&mut self, key: &NodeKey) -> GraphResult<usize> {
        let mut linked = 0;
        for rule in &COMMUNITY_RULES {
            let present = match rule.presence {
                Presence::Always => true,
                Presence::Chance(p) => self.rng.gen::<f64>() < p,
            };
            if present {
                self.graph.add_edge(key, &NodeKey::community(rule.name), rule.weight)?;
                linked += 1;
            }
        }
        Ok(linked)
    }
}

/// `1 + floor(3 * mc_norm)`, capped at the number of wallets.
pub fn wallet_count(mc_norm: f64) -> usize {
    (1 + (3.0 * mc_norm).floor() as usize).min(WALLETS.len())
}

// Reject the whole batch up front so no half-built graph escapes.
fn validate(projects: &[ProjectRecord]) -> GraphResult<()> {
    let mut seen = AHashSet::with_capacity(projects.len());
    for (index, record) in projects.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(GraphError::MissingIdentifier { index });
        }
        if !seen.insert(record.id.as_str()) {
            return Err(GraphError::DuplicateProject { id: record.id.clone() });
        }
    }
    Ok(())
}

fn record_metrics(graph: &Graph) {
    metrics::counter!("cryptograph_projects_total").increment(graph.projects().count() as u64);
    for kind in [NodeType::Exchange, NodeType::Wallet, NodeType::Community] {
        let n = graph
            .edges()
            .iter()
            .filter(|e| e.source.kind == kind || e.target.kind == kind)
            .count();
        metrics::counter!("cryptograph_edges_total", "kind" => kind.as_str()).increment(n as u64);
    }
}
