use std::collections::{HashMap, HashSet};

use crate::algorithms::{
    LinkStateSnapshot, TableSnapshot, solve_distance_vector, solve_link_state,
};
use crate::config::SolveOptions;
use crate::network::{Graph, TopologyError};
use crate::protocol::RoutingTable;
use crate::trace::Trace;
use crate::{Cost, Protocol, RouterId};

/// Outcome of one solve: the reconstructed path, the full trace, and the
/// protocol-specific state it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub path: Vec<RouterId>,
    pub trace: Trace,
    pub data: SolveData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolveData {
    LinkState {
        distances: HashMap<RouterId, Cost>,
        predecessors: HashMap<RouterId, Option<RouterId>>,
        snapshots: Vec<LinkStateSnapshot>,
    },
    DistanceVector {
        tables: HashMap<RouterId, RoutingTable>,
        snapshots: Vec<TableSnapshot>,
        converged: bool,
        iterations: u32,
    },
}

/// Runs the selected protocol over a consistent snapshot of the graph and
/// reconstructs the source-to-destination path. An unreachable destination is
/// a normal result (empty path), not an error.
pub fn solve(
    graph: &Graph,
    source: &str,
    destination: &str,
    protocol: Protocol,
    options: &SolveOptions,
) -> Result<SolveResult, TopologyError> {
    if !graph.contains(destination) {
        return Err(TopologyError::UnknownRouter(destination.to_string()));
    }
    match protocol {
        Protocol::LinkState => {
            let result = solve_link_state(graph, source, options.metric)?;
            let path = path_from_predecessors(&result.predecessors, source, destination);
            Ok(SolveResult {
                path,
                trace: result.trace,
                data: SolveData::LinkState {
                    distances: result.distances,
                    predecessors: result.predecessors,
                    snapshots: result.snapshots,
                },
            })
        }
        Protocol::DistanceVector => {
            if !graph.contains(source) {
                return Err(TopologyError::UnknownRouter(source.to_string()));
            }
            let result = solve_distance_vector(graph, options)?;
            let path = path_from_tables(&result.tables, source, destination);
            Ok(SolveResult {
                path,
                trace: result.trace,
                data: SolveData::DistanceVector {
                    tables: result.tables,
                    snapshots: result.snapshots,
                    converged: result.converged,
                    iterations: result.iterations,
                },
            })
        }
    }
}

/// Walks predecessor links backward from the destination. Empty unless the
/// walk terminates at the source.
pub fn path_from_predecessors(
    predecessors: &HashMap<RouterId, Option<RouterId>>,
    source: &str,
    destination: &str,
) -> Vec<RouterId> {
    let mut path = Vec::new();
    let mut current = Some(destination.to_string());

    while let Some(node) = current {
        path.push(node.clone());
        current = predecessors.get(&node).cloned().flatten();
    }
    path.reverse();

    if path.first().map(String::as_str) != Some(source) {
        return Vec::new();
    }
    path
}

/// Walks next hops forward from the source. Returns the empty path when the
/// destination cannot be reached, including via inconsistent next-hop data
/// (self-referencing hops, cycles).
pub fn path_from_tables(
    tables: &HashMap<RouterId, RoutingTable>,
    source: &str,
    destination: &str,
) -> Vec<RouterId> {
    let mut path = vec![source.to_string()];
    let mut visited: HashSet<RouterId> = HashSet::new();
    visited.insert(source.to_string());
    let mut current = source.to_string();

    while current != destination {
        let next = match tables.get(&current).and_then(|t| t.next_hop_to(destination)) {
            Some(next) => next.clone(),
            None => return Vec::new(),
        };
        if next == current || !visited.insert(next.clone()) {
            return Vec::new();
        }
        path.push(next.clone());
        current = next;
    }
    path
}
