pub mod types;
pub use types::*;
pub mod dot;
pub mod snapshot;
pub mod tabular;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::graph::types::Graph;

pub const NODES_FILE: &str = "nodes.csv";
pub const EDGES_FILE: &str = "edges.csv";
pub const DOT_FILE: &str = "graph.dot";

/// Paths written by [`write_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPaths {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub dot: PathBuf,
}

/// Write `nodes.csv` and `edges.csv` into `dir`, creating it if needed.
pub fn write_csv_dir(graph: &Graph, dir: &Path) -> ExportResult<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;
    let nodes = dir.join(NODES_FILE);
    let edges = dir.join(EDGES_FILE);

    let node_rows = tabular::write_nodes(graph, BufWriter::new(File::create(&nodes)?))?;
    let edge_rows = tabular::write_edges(graph, BufWriter::new(File::create(&edges)?))?;
    info!(node_rows, edge_rows, dir = %dir.display(), "Exported nodes.csv and edges.csv");
    Ok((nodes, edges))
}

/// Tables plus the Graphviz rendering.
pub fn write_all(graph: &Graph, dir: &Path) -> ExportResult<ExportPaths> {
    let (nodes, edges) = write_csv_dir(graph, dir)?;
    let dot = dir.join(DOT_FILE);
    dot::write_dot(graph, &dot)?;
    info!(path = %dot.display(), "Saved graph rendering");
    Ok(ExportPaths { nodes, edges, dot })
}
