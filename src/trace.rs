use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::Serialize;

use crate::{Cost, INFINITY, Protocol, RouterId};

/// Renders a distance with an explicit token for the unreachable sentinel.
pub fn format_cost(cost: Cost) -> String {
    if cost == INFINITY {
        "unreachable".to_string()
    } else {
        cost.to_string()
    }
}

/// One structured solve-time event. The `Display` impl produces the
/// human-readable log line; callers wanting deltas match on the variant
/// instead of re-parsing strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    SolveStarted {
        protocol: Protocol,
        source: Option<RouterId>,
    },
    DistanceUpdated {
        node: RouterId,
        via: RouterId,
        distance: Cost,
    },
    NodeVisited {
        node: RouterId,
        distance: Cost,
    },
    LinkStateSummary {
        distances: BTreeMap<RouterId, Cost>,
        predecessors: BTreeMap<RouterId, Option<RouterId>>,
    },
    IterationStarted {
        iteration: u32,
    },
    RouteUpdated {
        node: RouterId,
        destination: RouterId,
        via: RouterId,
        distance: Cost,
    },
    Converged {
        iteration: u32,
    },
    IterationLimitReached {
        iterations: u32,
    },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::SolveStarted {
                protocol,
                source: Some(source),
            } => write!(f, "Starting {protocol} solve from router {source}"),
            TraceEvent::SolveStarted {
                protocol,
                source: None,
            } => write!(f, "Starting {protocol} solve"),
            TraceEvent::DistanceUpdated { node, via, distance } => write!(
                f,
                "Updated distance to {node} via {via}: {}",
                format_cost(*distance)
            ),
            TraceEvent::NodeVisited { node, distance } => write!(
                f,
                "Visiting router {node} with distance {}",
                format_cost(*distance)
            ),
            TraceEvent::LinkStateSummary {
                distances,
                predecessors,
            } => {
                write!(f, "Final distances:")?;
                for (node, distance) in distances {
                    write!(f, " {node}={}", format_cost(*distance))?;
                }
                write!(f, "; predecessors:")?;
                for (node, predecessor) in predecessors {
                    match predecessor {
                        Some(via) => write!(f, " {node}<-{via}")?,
                        None => write!(f, " {node}<-none")?,
                    }
                }
                Ok(())
            }
            TraceEvent::IterationStarted { iteration } => write!(f, "Iteration {iteration}"),
            TraceEvent::RouteUpdated {
                node,
                destination,
                via,
                distance,
            } => write!(
                f,
                "Router {node} updated route to {destination} via {via}: distance {}",
                format_cost(*distance)
            ),
            TraceEvent::Converged { iteration } => {
                write!(f, "Network has converged after {iteration} iteration(s)")
            }
            TraceEvent::IterationLimitReached { iterations } => {
                write!(f, "Reached maximum iterations ({iterations}) without convergence")
            }
        }
    }
}

/// Append-only, ordered record of a single solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: TraceEvent) {
        debug!("{event}");
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// The rendered log, one line per event.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(|e| e.to_string())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_cost_renders_as_unreachable() {
        assert_eq!(format_cost(INFINITY), "unreachable");
        assert_eq!(format_cost(9), "9");
    }

    #[test]
    fn summary_line_uses_unreachable_token() {
        let mut distances = BTreeMap::new();
        distances.insert("A".to_string(), 0);
        distances.insert("G".to_string(), INFINITY);
        let mut predecessors = BTreeMap::new();
        predecessors.insert("A".to_string(), None);
        predecessors.insert("G".to_string(), None);

        let line = TraceEvent::LinkStateSummary {
            distances,
            predecessors,
        }
        .to_string();
        assert!(line.contains("A=0"));
        assert!(line.contains("G=unreachable"));
        assert!(!line.contains(&INFINITY.to_string()));
    }

    #[test]
    fn trace_preserves_append_order() {
        let mut trace = Trace::new();
        trace.push(TraceEvent::IterationStarted { iteration: 1 });
        trace.push(TraceEvent::Converged { iteration: 1 });
        let lines: Vec<_> = trace.lines().collect();
        assert_eq!(lines[0], "Iteration 1");
        assert!(lines[1].starts_with("Network has converged"));
    }
}
