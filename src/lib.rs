pub mod algorithms;
pub mod config;
pub mod network;
pub mod protocol;
pub mod routing;
pub mod simulation;
pub mod trace;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type RouterId = String;
pub type Cost = u32;

/// Sentinel distance for an unreachable destination.
pub const INFINITY: Cost = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    LinkState,
    DistanceVector,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::LinkState => write!(f, "link-state"),
            Protocol::DistanceVector => write!(f, "distance-vector"),
        }
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "link-state" | "ospf" => Ok(Protocol::LinkState),
            "distance-vector" | "rip" => Ok(Protocol::DistanceVector),
            other => Err(format!(
                "unknown protocol '{other}' (expected link-state or distance-vector)"
            )),
        }
    }
}

pub use config::{CostMetric, SimulatorConfig, SolveOptions};
pub use network::{AdjacencyList, EditError, Graph, Link, Neighbor, Router, TopologyError};
pub use protocol::{RouteEntry, RoutingTable};
pub use routing::{SolveData, SolveResult, solve};
pub use simulation::{SimulationStep, StepPhase, build_steps};
pub use trace::{Trace, TraceEvent};
