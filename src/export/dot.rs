// Graphviz hand-off for visual inspection. Styling is keyed purely on node type.

use std::fmt::Write as _;
use std::path::Path;

use itertools::Itertools;

use crate::export::types::ExportResult;
use crate::graph::types::{Graph, Node, NodeType};

const MAX_LABEL_CHARS: usize = 17;
const TRUNCATED_LABEL_CHARS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub color: &'static str,
    pub size: u32,
}

impl NodeStyle {
    pub fn for_type(kind: NodeType) -> Self {
        match kind {
            NodeType::Project => NodeStyle { color: "blue", size: 40 },
            NodeType::Exchange => NodeStyle { color: "red", size: 120 },
            NodeType::Wallet => NodeStyle { color: "green", size: 100 },
            NodeType::Community => NodeStyle { color: "orange", size: 80 },
        }
    }

    // Graphviz sizes are inches
    fn inches(&self) -> f64 {
        self.size as f64 / 100.0
    }
}

/// Shorten long names to 16 chars plus `...`.
pub fn label(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL_CHARS {
        name.to_string()
    } else {
        format!("{}...", name.chars().take(TRUNCATED_LABEL_CHARS).collect::<String>())
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn tooltip(node: &Node) -> String {
    match node {
        Node::Project(p) => [
            format!("type: {}", NodeType::Project),
            format!("name: {}", p.name),
            format!("symbol: {}", p.symbol),
            format!("category: {}", p.category),
            format!("market_cap: {}", p.market_cap),
            format!("volume: {}", p.volume),
        ]
        .iter()
        .join("\n"),
        other => format!("type: {}\nname: {}", other.node_type(), other.name()),
    }
}

/// Render the graph as an undirected Graphviz document.
pub fn render(graph: &Graph) -> String {
    let mut out = String::new();
    // writes to a String cannot fail
    let _ = writeln!(out, "graph cryptograph {{");
    let _ = writeln!(out, "  layout=sfdp;\n  overlap=false;");
    let _ = writeln!(out, "  node [style=filled, shape=circle, fixedsize=true, fontsize=8];");

    for node in graph.nodes() {
        let style = NodeStyle::for_type(node.node_type());
        let _ = writeln!(
            out,
            "  {} [label={}, tooltip={}, fillcolor={}, width={:.2}];",
            quote(&node.key().to_string()),
            quote(&label(node.name())),
            quote(&tooltip(node)),
            style.color,
            style.inches(),
        );
    }
    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "  {} -- {} [penwidth={:.3}];",
            quote(&edge.source.to_string()),
            quote(&edge.target.to_string()),
            edge.weight,
        );
    }
    out.push_str("}\n");
    out
}

pub fn write_dot(graph: &Graph, path: &Path) -> ExportResult<()> {
    std::fs::write(path, render(graph))?;
    Ok(())
}
