use std::fmt;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("project record at index {index} has no identifier")]
    MissingIdentifier { index: usize },
    #[error("project `{id}` appears more than once in the batch")]
    DuplicateProject { id: String },
    #[error("edge endpoint {key} is not in the graph")]
    MissingEndpoint { key: NodeKey },
}

pub type GraphResult<T> = Result<T, GraphError>;

// Input record as handed over by the data-fetch side. Missing numbers stay None.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl ProjectRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            price: None,
            market_cap: None,
            volume: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Market cap with absent or non-finite values mapped to 0.
    pub fn market_cap_or_zero(&self) -> f64 {
        finite_or_zero(self.market_cap)
    }

    /// 24h volume with absent or non-finite values mapped to 0.
    pub fn volume_or_zero(&self) -> f64 {
        finite_or_zero(self.volume)
    }
}

fn finite_or_zero(v: Option<f64>) -> f64 {
    v.filter(|x| x.is_finite()).unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    AI,
    Gaming,
    RWA,
    Meme,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AI => "AI",
            Category::Gaming => "Gaming",
            Category::RWA => "RWA",
            Category::Meme => "Meme",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Project,
    Exchange,
    Wallet,
    Community,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Project => "project",
            NodeType::Exchange => "exchange",
            NodeType::Wallet => "wallet",
            NodeType::Community => "community",
        }
    }

    // Prefix used when a key has to be flattened to a single string column.
    fn prefix(&self) -> &'static str {
        match self {
            NodeType::Project => "proj",
            NodeType::Exchange => "ex",
            NodeType::Wallet => "w",
            NodeType::Community => "comm",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node identity: entity kind plus its natural key (project id or entity name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub kind: NodeType,
    pub id: String,
}

impl NodeKey {
    pub fn new(kind: NodeType, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    pub fn project(id: impl Into<String>) -> Self {
        Self::new(NodeType::Project, id)
    }

    pub fn exchange(name: impl Into<String>) -> Self {
        Self::new(NodeType::Exchange, name)
    }

    pub fn wallet(name: impl Into<String>) -> Self {
        Self::new(NodeType::Wallet, name)
    }

    pub fn community(name: impl Into<String>) -> Self {
        Self::new(NodeType::Community, name)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.kind.prefix(), self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectNode {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: Option<f64>,
    pub market_cap: f64,
    pub volume: f64,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Project(ProjectNode),
    Exchange { name: String },
    Wallet { name: String },
    Community { name: String },
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Project(_) => NodeType::Project,
            Node::Exchange { .. } => NodeType::Exchange,
            Node::Wallet { .. } => NodeType::Wallet,
            Node::Community { .. } => NodeType::Community,
        }
    }

    pub fn key(&self) -> NodeKey {
        match self {
            Node::Project(p) => NodeKey::project(&p.id),
            Node::Exchange { name } => NodeKey::exchange(name),
            Node::Wallet { name } => NodeKey::wallet(name),
            Node::Community { name } => NodeKey::community(name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Project(p) => &p.name,
            Node::Exchange { name } | Node::Wallet { name } | Node::Community { name } => name,
        }
    }

    pub fn as_project(&self) -> Option<&ProjectNode> {
        match self {
            Node::Project(p) => Some(p),
            _ => None,
        }
    }
}

// Undirected weighted edge. `source` is whichever endpoint was passed first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeKey,
    pub target: NodeKey,
    pub weight: f64,
}

impl Edge {
    pub fn connects(&self, a: &NodeKey, b: &NodeKey) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }
}

/// Simple undirected weighted graph. Nodes and edges keep insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    node_index: AHashMap<NodeKey, usize>,
    #[serde(skip)]
    edge_index: AHashMap<(NodeKey, NodeKey), usize>,
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.node_index.contains_key(key)
    }

    pub fn node(&self, key: &NodeKey) -> Option<&Node> {
        self.node_index.get(key).map(|&i| &self.nodes[i])
    }

    pub fn edge(&self, a: &NodeKey, b: &NodeKey) -> Option<&Edge> {
        self.edge_index.get(&pair(a, b)).map(|&i| &self.edges[i])
    }

    /// Edges touching `key`, in insertion order.
    pub fn edges_of<'a>(&'a self, key: &'a NodeKey) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges
            .iter()
            .filter(move |e| &e.source == key || &e.target == key)
    }

    pub fn projects(&self) -> impl Iterator<Item = &ProjectNode> {
        self.nodes.iter().filter_map(Node::as_project)
    }

    /// Insert a node. Returns false (and keeps the existing node) if the key is taken.
    pub fn add_node(&mut self, node: Node) -> bool {
        let key = node.key();
        if self.node_index.contains_key(&key) {
            return false;
        }
        self.node_index.insert(key, self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Insert an undirected edge between two existing nodes.
    /// Re-adding an existing pair replaces its weight; returns whether a new edge was created.
    pub fn add_edge(&mut self, a: &NodeKey, b: &NodeKey, weight: f64) -> GraphResult<bool> {
        for key in [a, b] {
            if !self.contains(key) {
                return Err(GraphError::MissingEndpoint { key: key.clone() });
            }
        }
        let k = pair(a, b);
        if let Some(&i) = self.edge_index.get(&k) {
            self.edges[i].weight = weight;
            return Ok(false);
        }
        self.edge_index.insert(k, self.edges.len());
        self.edges.push(Edge {
            source: a.clone(),
            target: b.clone(),
            weight,
        });
        Ok(true)
    }
}

fn pair(a: &NodeKey, b: &NodeKey) -> (NodeKey, NodeKey) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display_is_namespaced() {
        assert_eq!(NodeKey::project("bitcoin").to_string(), "proj::bitcoin");
        assert_eq!(NodeKey::exchange("Binance").to_string(), "ex::Binance");
        assert_eq!(NodeKey::wallet("Ledger").to_string(), "w::Ledger");
        assert_eq!(NodeKey::community("Reddit").to_string(), "comm::Reddit");
    }

    #[test]
    fn test_same_name_different_kind_does_not_collide() {
        let mut graph = Graph::new();
        assert!(graph.add_node(Node::Wallet { name: "Ledger".into() }));
        assert!(graph.add_node(Node::Project(ProjectNode {
            id: "Ledger".into(),
            name: "Ledger".into(),
            symbol: "LDG".into(),
            price: None,
            market_cap: 0.0,
            volume: 0.0,
            category: Category::Other,
        })));
        assert_eq!(graph.node_count(), 2);
        assert!(!graph.add_node(Node::Wallet { name: "Ledger".into() }));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_add_edge_requires_endpoints() {
        let mut graph = Graph::new();
        graph.add_node(Node::Exchange { name: "Kraken".into() });
        let err = graph
            .add_edge(&NodeKey::project("x"), &NodeKey::exchange("Kraken"), 1.0)
            .unwrap_err();
        assert_eq!(err, GraphError::MissingEndpoint { key: NodeKey::project("x") });
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_edges_are_undirected_and_unique() {
        let mut graph = Graph::new();
        let a = NodeKey::exchange("OKX");
        let b = NodeKey::community("Twitter");
        graph.add_node(Node::Exchange { name: "OKX".into() });
        graph.add_node(Node::Community { name: "Twitter".into() });

        assert_eq!(graph.add_edge(&a, &b, 0.5), Ok(true));
        assert_eq!(graph.add_edge(&b, &a, 0.7), Ok(false));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge(&a, &b).map(|e| e.weight), Some(0.7));
        assert!(graph.edges()[0].connects(&b, &a));
    }

    #[test]
    fn test_record_defaults() {
        let record: ProjectRecord = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.market_cap_or_zero(), 0.0);
        assert_eq!(record.volume_or_zero(), 0.0);

        let record = ProjectRecord::new("y", "Y", "Y").with_market_cap(f64::NAN).with_volume(3.0);
        assert_eq!(record.market_cap_or_zero(), 0.0);
        assert_eq!(record.volume_or_zero(), 3.0);
    }

    #[test]
    fn test_node_serializes_with_type_tag() {
        let json = serde_json::to_value(Node::Exchange { name: "Gate".into() }).unwrap();
        assert_eq!(json["type"], "exchange");
        assert_eq!(json["name"], "Gate");
    }
}
