use cryptograph_rs::export;
use cryptograph_rs::graph::{build, ProjectRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_write_all_produces_consistent_tables() {
    let batch = vec![
        ProjectRecord::new("x", "MetaAI", "MAI").with_market_cap(1000.0).with_volume(500.0),
        ProjectRecord::new("y", "Plain Coin", "pln").with_market_cap(10.0),
    ];
    let graph = build(&batch, &mut StdRng::seed_from_u64(8)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let paths = export::write_all(&graph, dir.path()).unwrap();

    let mut nodes = csv::Reader::from_path(&paths.nodes).unwrap();
    let node_ids: Vec<String> = nodes
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();
    assert_eq!(node_ids.len(), 17);
    assert!(node_ids.contains(&"proj::x".to_string()));

    let mut edges = csv::Reader::from_path(&paths.edges).unwrap();
    let headers: Vec<String> = edges.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["source", "target", "weight"]);
    let mut rows = 0;
    for record in edges.records() {
        let record = record.unwrap();
        assert!(node_ids.iter().any(|id| id == &record[0]));
        assert!(node_ids.iter().any(|id| id == &record[1]));
        assert!(record[2].parse::<f64>().unwrap() > 0.0);
        rows += 1;
    }
    assert_eq!(rows, graph.edge_count());

    let dot = std::fs::read_to_string(&paths.dot).unwrap();
    assert_eq!(dot.matches(" -- ").count(), graph.edge_count());
}
