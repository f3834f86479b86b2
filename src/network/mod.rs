mod topology;

pub use topology::{AdjacencyList, EditError, Graph, Link, Neighbor, Router, TopologyError};
