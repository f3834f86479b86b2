use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use log::info;
use serde::Serialize;

use crate::config::CostMetric;
use crate::network::{Graph, TopologyError};
use crate::trace::{Trace, TraceEvent};
use crate::{Cost, INFINITY, Protocol, RouterId};

/// Full solver state captured each time a router is visited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkStateSnapshot {
    pub current: RouterId,
    pub distances: HashMap<RouterId, Cost>,
    pub predecessors: HashMap<RouterId, Option<RouterId>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkStateResult {
    pub distances: HashMap<RouterId, Cost>,
    pub predecessors: HashMap<RouterId, Option<RouterId>>,
    pub snapshots: Vec<LinkStateSnapshot>,
    pub trace: Trace,
}

#[derive(Debug)]
struct State {
    priority: Cost,
    router: RouterId,
}

impl Eq for State {}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other.priority.cmp(&self.priority)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest paths over the link-state view of the topology.
///
/// Stale frontier entries are discarded lazily on pop rather than re-keyed in
/// place; the visit order and update count in the trace depend on this.
pub fn solve_link_state(
    graph: &Graph,
    source: &str,
    metric: CostMetric,
) -> Result<LinkStateResult, TopologyError> {
    if !graph.contains(source) {
        return Err(TopologyError::UnknownRouter(source.to_string()));
    }
    let adjacency = graph.build_adjacency()?;

    let mut distances: HashMap<RouterId, Cost> = HashMap::new();
    let mut predecessors: HashMap<RouterId, Option<RouterId>> = HashMap::new();
    let mut snapshots = Vec::new();
    let mut trace = Trace::new();
    let mut heap = BinaryHeap::new();

    for id in graph.router_ids() {
        distances.insert(id.clone(), INFINITY);
        predecessors.insert(id.clone(), None);
    }
    distances.insert(source.to_string(), 0);

    heap.push(State {
        priority: 0,
        router: source.to_string(),
    });
    trace.push(TraceEvent::SolveStarted {
        protocol: Protocol::LinkState,
        source: Some(source.to_string()),
    });

    while let Some(State { priority, router }) = heap.pop() {
        // Stale entry: a better path was found after this one was pushed.
        if priority > *distances.get(&router).unwrap_or(&INFINITY) {
            continue;
        }

        trace.push(TraceEvent::NodeVisited {
            node: router.clone(),
            distance: priority,
        });
        snapshots.push(LinkStateSnapshot {
            current: router.clone(),
            distances: distances.clone(),
            predecessors: predecessors.clone(),
        });

        for neighbor in adjacency.neighbors(&router) {
            let edge_cost = metric.link_cost(neighbor);
            let candidate = priority.saturating_add(edge_cost);

            if candidate < *distances.get(&neighbor.id).unwrap_or(&INFINITY) {
                distances.insert(neighbor.id.clone(), candidate);
                predecessors.insert(neighbor.id.clone(), Some(router.clone()));
                heap.push(State {
                    priority: candidate,
                    router: neighbor.id.clone(),
                });
                trace.push(TraceEvent::DistanceUpdated {
                    node: neighbor.id.clone(),
                    via: router.clone(),
                    distance: candidate,
                });
            }
        }
    }

    trace.push(TraceEvent::LinkStateSummary {
        distances: distances
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect::<BTreeMap<_, _>>(),
        predecessors: predecessors
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    });
    info!(
        "link-state solve from {source} visited {} router(s)",
        snapshots.len()
    );

    Ok(LinkStateResult {
        distances,
        predecessors,
        snapshots,
        trace,
    })
}
