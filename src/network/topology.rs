use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Cost, RouterId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Router {
    pub id: RouterId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub source: RouterId,
    pub target: RouterId,
    pub weight: Cost,
    /// Nominal bandwidth in Mbps, used by the link-state bandwidth metric.
    pub bandwidth: Option<u64>,
}

impl Link {
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Rejected graph edit. The graph is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("link endpoints must differ: {0}")]
    SelfLoop(RouterId),
    #[error("unknown router {0}")]
    UnknownRouter(RouterId),
    #[error("link between {0} and {1} already exists")]
    DuplicateLink(RouterId, RouterId),
    #[error("link weight must be at least 1")]
    ZeroWeight,
}

/// Structural inconsistency detected while solving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("link references unknown router {0}")]
    UnknownEndpoint(RouterId),
    #[error("unknown router {0}")]
    UnknownRouter(RouterId),
}

/// An undirected weighted topology of routers and links.
///
/// Routers and links keep insertion order so that solver iteration, and
/// therefore traces, are reproducible across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    routers: Vec<Router>,
    links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: RouterId,
    pub weight: Cost,
    pub bandwidth: Option<u64>,
}

/// Per-router incident neighbors, rebuilt fresh for every solve.
#[derive(Debug, Clone)]
pub struct AdjacencyList {
    map: HashMap<RouterId, Vec<Neighbor>>,
}

impl AdjacencyList {
    pub fn neighbors(&self, id: &str) -> &[Neighbor] {
        self.map.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The starter lab topology: six routers, seven links.
    pub fn sample() -> Self {
        let mut graph = Self::new();
        for _ in 0..6 {
            graph.add_router();
        }
        let links = [
            ("A", "B", 5, 100),
            ("B", "C", 3, 200),
            ("A", "D", 2, 300),
            ("B", "E", 4, 150),
            ("C", "F", 1, 400),
            ("D", "E", 3, 250),
            ("E", "F", 6, 50),
        ];
        for (source, target, weight, bandwidth) in links {
            graph
                .add_link(source, target, weight, Some(bandwidth))
                .expect("sample topology is valid");
        }
        graph
    }

    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn router_ids(&self) -> impl Iterator<Item = &RouterId> {
        self.routers.iter().map(|r| &r.id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.routers.iter().any(|r| r.id == id)
    }

    pub fn link_between(&self, a: &str, b: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.connects(a, b))
    }

    /// Adds a router with the next identifier after the highest letter in use.
    pub fn add_router(&mut self) -> RouterId {
        let next = self
            .routers
            .iter()
            .filter_map(|r| single_letter(&r.id))
            .max()
            .map(|c| (c as u8 + 1) as char)
            .unwrap_or('A');
        let id: RouterId = next.to_string();
        debug!("adding router {id}");
        self.routers.push(Router {
            name: format!("Router {id}"),
            id: id.clone(),
        });
        id
    }

    /// Adds an undirected link, rejecting self-loops, unknown endpoints,
    /// duplicate pairs, and zero weights. Rejection leaves the graph unchanged.
    pub fn add_link(
        &mut self,
        source: &str,
        target: &str,
        weight: Cost,
        bandwidth: Option<u64>,
    ) -> Result<(), EditError> {
        if source == target {
            return Err(EditError::SelfLoop(source.to_string()));
        }
        for id in [source, target] {
            if !self.contains(id) {
                return Err(EditError::UnknownRouter(id.to_string()));
            }
        }
        if self.link_between(source, target).is_some() {
            return Err(EditError::DuplicateLink(
                source.to_string(),
                target.to_string(),
            ));
        }
        if weight < 1 {
            return Err(EditError::ZeroWeight);
        }
        debug!("adding link {source} <-> {target} weight {weight}");
        self.links.push(Link {
            source: source.to_string(),
            target: target.to_string(),
            weight,
            bandwidth,
        });
        Ok(())
    }

    /// Builds the symmetric adjacency list. Each undirected link contributes
    /// an entry to both endpoints, in link-insertion order.
    pub fn build_adjacency(&self) -> Result<AdjacencyList, TopologyError> {
        let mut map: HashMap<RouterId, Vec<Neighbor>> = HashMap::new();
        for router in &self.routers {
            map.insert(router.id.clone(), Vec::new());
        }
        for link in &self.links {
            for id in [&link.source, &link.target] {
                if !map.contains_key(id.as_str()) {
                    return Err(TopologyError::UnknownEndpoint(id.clone()));
                }
            }
            map.get_mut(&link.source)
                .expect("checked above")
                .push(Neighbor {
                    id: link.target.clone(),
                    weight: link.weight,
                    bandwidth: link.bandwidth,
                });
            map.get_mut(&link.target)
                .expect("checked above")
                .push(Neighbor {
                    id: link.source.clone(),
                    weight: link.weight,
                    bandwidth: link.bandwidth,
                });
        }
        Ok(AdjacencyList { map })
    }

    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let graph: Graph = serde_json::from_str(&content)?;
        Ok(graph)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn single_letter(id: &str) -> Option<char> {
    let mut chars = id.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(c),
        _ => None,
    }
}
