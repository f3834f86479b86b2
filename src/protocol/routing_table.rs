use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Cost, INFINITY, RouterId};

/// One destination entry in a router's distance-vector table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub destination: RouterId,
    pub distance: Cost,
    pub next_hop: Option<RouterId>,
}

/// A single router's view of every destination in the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTable {
    entries: HashMap<RouterId, RouteEntry>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route(&mut self, entry: RouteEntry) {
        self.entries.insert(entry.destination.clone(), entry);
    }

    pub fn get_route(&self, destination: &str) -> Option<&RouteEntry> {
        self.entries.get(destination)
    }

    pub fn distance_to(&self, destination: &str) -> Cost {
        self.entries
            .get(destination)
            .map(|e| e.distance)
            .unwrap_or(INFINITY)
    }

    pub fn next_hop_to(&self, destination: &str) -> Option<&RouterId> {
        self.entries
            .get(destination)
            .and_then(|e| e.next_hop.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouterId, &RouteEntry)> {
        self.entries.iter()
    }
}
