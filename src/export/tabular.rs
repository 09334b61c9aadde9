//! Tabular export: graph nodes and edges flattened to CSV rows.
//!
//! Only row mapping and writing lives here; file placement is handled in `export`.

use std::io::Write;

use crate::export::types::{EdgeRow, ExportResult, NodeRow};
use crate::graph::types::Graph;

/// Write `node_id,type,name,symbol,price,market_cap,volume,category` rows in graph order.
pub fn write_nodes<W: Write>(graph: &Graph, writer: W) -> ExportResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    for node in graph.nodes() {
        wtr.serialize(NodeRow::from(node))?;
    }
    wtr.flush()?;
    Ok(graph.node_count())
}

/// Write `source,target,weight` rows in graph order.
///
/// Builder edges always carry the project as `source` and the exchange, wallet or
/// community as `target`. The edges are undirected, so readers must not rely on
/// infrastructure nodes appearing first.
pub fn write_edges<W: Write>(graph: &Graph, writer: W) -> ExportResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    for edge in graph.edges() {
        wtr.serialize(EdgeRow::from(edge))?;
    }
    wtr.flush()?;
    Ok(graph.edge_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{Category, Node, NodeKey, ProjectNode};

    fn tiny_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::Exchange { name: "Kraken".into() });
        graph.add_node(Node::Project(ProjectNode {
            id: "fetch-ai".into(),
            name: "Fetch.ai".into(),
            symbol: "fet".into(),
            price: None,
            market_cap: 3.5e9,
            volume: 0.0,
            category: Category::AI,
        }));
        graph
            .add_edge(&NodeKey::project("fetch-ai"), &NodeKey::exchange("Kraken"), 1.25)
            .unwrap();
        graph
    }

    #[test]
    fn test_node_rows() {
        let mut buf = Vec::new();
        assert_eq!(write_nodes(&tiny_graph(), &mut buf).unwrap(), 2);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "node_id,type,name,symbol,price,market_cap,volume,category");
        assert_eq!(lines[1], "ex::Kraken,exchange,Kraken,,,,,");
        assert_eq!(lines[2], "proj::fetch-ai,project,Fetch.ai,fet,,3500000000.0,0.0,AI");
    }

    #[test]
    fn test_edge_rows() {
        let mut buf = Vec::new();
        assert_eq!(write_edges(&tiny_graph(), &mut buf).unwrap(), 1);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "source,target,weight\nproj::fetch-ai,ex::Kraken,1.25\n");
    }
}
