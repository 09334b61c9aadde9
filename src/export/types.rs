use serde::Serialize;
use thiserror::Error;

use crate::graph::types::{Edge, Node};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// One flattened `nodes.csv` row. Infrastructure nodes leave the project columns empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRow<'a> {
    pub node_id: String,
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub name: &'a str,
    pub symbol: Option<&'a str>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume: Option<f64>,
    pub category: Option<&'static str>,
}

impl<'a> From<&'a Node> for NodeRow<'a> {
    fn from(node: &'a Node) -> Self {
        let project = node.as_project();
        NodeRow {
            node_id: node.key().to_string(),
            node_type: node.node_type().as_str(),
            name: node.name(),
            symbol: project.map(|p| p.symbol.as_str()),
            price: project.and_then(|p| p.price),
            market_cap: project.map(|p| p.market_cap),
            volume: project.map(|p| p.volume),
            category: project.map(|p| p.category.as_str()),
        }
    }
}

/// One `edges.csv` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRow {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl From<&Edge> for EdgeRow {
    fn from(edge: &Edge) -> Self {
        EdgeRow {
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            weight: edge.weight,
        }
    }
}
