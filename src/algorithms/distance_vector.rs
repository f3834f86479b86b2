use std::collections::HashMap;

use log::info;
use serde::Serialize;

use crate::config::SolveOptions;
use crate::network::{Graph, TopologyError};
use crate::protocol::{RouteEntry, RoutingTable};
use crate::trace::{Trace, TraceEvent};
use crate::{INFINITY, Protocol, RouterId};

/// All routing tables as they stood after one full relaxation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub iteration: u32,
    pub tables: HashMap<RouterId, RoutingTable>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceVectorResult {
    pub tables: HashMap<RouterId, RoutingTable>,
    pub snapshots: Vec<TableSnapshot>,
    pub trace: Trace,
    pub converged: bool,
    pub iterations: u32,
}

/// Iterative all-pairs table relaxation, RIP style.
///
/// Passes run nodes-then-neighbors-then-destinations with updates applied
/// immediately, so a change earlier in a pass is visible to later relaxations
/// in the same pass. Trace output depends on both the order and the
/// immediacy.
pub fn solve_distance_vector(
    graph: &Graph,
    options: &SolveOptions,
) -> Result<DistanceVectorResult, TopologyError> {
    let adjacency = graph.build_adjacency()?;
    let ids: Vec<RouterId> = graph.router_ids().cloned().collect();

    let mut tables: HashMap<RouterId, RoutingTable> = HashMap::new();
    let mut trace = Trace::new();
    let mut snapshots = Vec::new();

    for node in &ids {
        let mut table = RoutingTable::new();
        for destination in &ids {
            let entry = if node == destination {
                RouteEntry {
                    destination: destination.clone(),
                    distance: 0,
                    next_hop: Some(node.clone()),
                }
            } else if let Some(direct) = adjacency
                .neighbors(node)
                .iter()
                .find(|n| &n.id == destination)
            {
                RouteEntry {
                    destination: destination.clone(),
                    distance: direct.weight,
                    next_hop: Some(destination.clone()),
                }
            } else {
                RouteEntry {
                    destination: destination.clone(),
                    distance: INFINITY,
                    next_hop: None,
                }
            };
            table.add_route(entry);
        }
        tables.insert(node.clone(), table);
    }

    trace.push(TraceEvent::SolveStarted {
        protocol: Protocol::DistanceVector,
        source: None,
    });
    snapshots.push(TableSnapshot {
        iteration: 0,
        tables: tables.clone(),
    });

    let mut converged = false;
    let mut iteration = 0;

    while !converged && iteration < options.max_iterations {
        iteration += 1;
        trace.push(TraceEvent::IterationStarted { iteration });
        let mut changed = false;

        for node in &ids {
            for neighbor in adjacency.neighbors(node) {
                for destination in &ids {
                    let current = tables[node].distance_to(destination);

                    // RIP cutoff: entries at or past the ceiling (the
                    // unreachable sentinel included) are not relaxed.
                    if let Some(limit) = options.hop_limit {
                        if current >= limit {
                            continue;
                        }
                    }

                    let via = tables[&neighbor.id].distance_to(destination);
                    let mut candidate = neighbor.weight.saturating_add(via);
                    if let Some(limit) = options.hop_limit {
                        if candidate > limit {
                            candidate = INFINITY;
                        }
                    }

                    if candidate < current {
                        tables
                            .get_mut(node)
                            .expect("table exists for every router")
                            .add_route(RouteEntry {
                                destination: destination.clone(),
                                distance: candidate,
                                next_hop: Some(neighbor.id.clone()),
                            });
                        changed = true;
                        trace.push(TraceEvent::RouteUpdated {
                            node: node.clone(),
                            destination: destination.clone(),
                            via: neighbor.id.clone(),
                            distance: candidate,
                        });
                    }
                }
            }
        }

        snapshots.push(TableSnapshot {
            iteration,
            tables: tables.clone(),
        });

        if !changed {
            converged = true;
            trace.push(TraceEvent::Converged { iteration });
        }
    }

    if !converged {
        trace.push(TraceEvent::IterationLimitReached {
            iterations: options.max_iterations,
        });
    }
    info!(
        "distance-vector solve finished after {iteration} iteration(s), converged: {converged}"
    );

    Ok(DistanceVectorResult {
        tables,
        snapshots,
        trace,
        converged,
        iterations: iteration,
    })
}
