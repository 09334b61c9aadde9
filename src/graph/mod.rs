// Affinity graph core
pub mod types;       // records, node keys, nodes, edges, graph container
pub mod classifier;  // keyword categorisation of project names
pub mod builder;     // synthesizes project <-> infrastructure edges

pub use builder::{build, GraphBuilder};
pub use types::*;
