use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::network::Neighbor;
use crate::{Cost, INFINITY, Protocol};

/// Reference bandwidth in Mbps for the bandwidth-derived link cost.
pub const REFERENCE_BANDWIDTH: u64 = 1000;

/// Default iteration bound for the distance-vector solver.
pub const MAX_ITERATIONS: u32 = 20;

/// RIP's hop-metric ceiling.
pub const RIP_HOP_LIMIT: Cost = 15;

/// How a link's cost is derived for the link-state solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostMetric {
    /// The link's own weight.
    #[default]
    Weight,
    /// Cost inversely proportional to bandwidth, OSPF style. Links with no
    /// bandwidth attribute cost INFINITY (treated as down).
    Bandwidth,
}

impl CostMetric {
    pub fn link_cost(&self, neighbor: &Neighbor) -> Cost {
        match self {
            CostMetric::Weight => neighbor.weight,
            CostMetric::Bandwidth => match neighbor.bandwidth {
                Some(bandwidth) if bandwidth > 0 => {
                    ((REFERENCE_BANDWIDTH / bandwidth) as Cost).max(1)
                }
                _ => INFINITY,
            },
        }
    }
}

impl fmt::Display for CostMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostMetric::Weight => write!(f, "weight"),
            CostMetric::Bandwidth => write!(f, "bandwidth"),
        }
    }
}

impl FromStr for CostMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight" => Ok(CostMetric::Weight),
            "bandwidth" => Ok(CostMetric::Bandwidth),
            other => Err(format!("unknown metric '{other}' (expected weight or bandwidth)")),
        }
    }
}

/// Per-solve parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOptions {
    pub metric: CostMetric,
    /// Routes at or beyond this metric are unusable (RIP-style cutoff).
    pub hop_limit: Option<Cost>,
    pub max_iterations: u32,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            metric: CostMetric::Weight,
            hop_limit: None,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl SolveOptions {
    /// RIP-like mode: 15-hop ceiling.
    pub fn rip() -> Self {
        Self {
            hop_limit: Some(RIP_HOP_LIMIT),
            ..Self::default()
        }
    }
}

/// Session-level knobs: chosen protocol, metric, and playback timing for the
/// external rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub protocol: Protocol,
    pub metric: CostMetric,
    pub hop_limit: Option<Cost>,
    pub max_iterations: u32,
    /// Base duration of one playback step in milliseconds.
    pub step_duration_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::LinkState,
            metric: CostMetric::Weight,
            hop_limit: None,
            max_iterations: MAX_ITERATIONS,
            step_duration_ms: 1000,
        }
    }
}

impl SimulatorConfig {
    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            metric: self.metric,
            hop_limit: self.hop_limit,
            max_iterations: self.max_iterations,
        }
    }

    /// Playback duration for one path segment, scaled by link weight.
    pub fn segment_duration(&self, weight: Cost) -> Duration {
        Duration::from_millis(self.step_duration_ms * u64::from(weight) / 5)
    }

    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SimulatorConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(weight: Cost, bandwidth: Option<u64>) -> Neighbor {
        Neighbor {
            id: "B".to_string(),
            weight,
            bandwidth,
        }
    }

    #[test]
    fn weight_metric_uses_link_weight() {
        assert_eq!(CostMetric::Weight.link_cost(&neighbor(5, Some(100))), 5);
    }

    #[test]
    fn bandwidth_metric_is_inverse_of_capacity() {
        // 1000 / 100 Mbps = 10
        assert_eq!(CostMetric::Bandwidth.link_cost(&neighbor(5, Some(100))), 10);
        // High-capacity links floor at cost 1.
        assert_eq!(CostMetric::Bandwidth.link_cost(&neighbor(5, Some(4000))), 1);
    }

    #[test]
    fn bandwidth_metric_treats_missing_capacity_as_down() {
        assert_eq!(CostMetric::Bandwidth.link_cost(&neighbor(5, None)), INFINITY);
        assert_eq!(CostMetric::Bandwidth.link_cost(&neighbor(5, Some(0))), INFINITY);
    }

    #[test]
    fn rip_options_carry_hop_ceiling() {
        let options = SolveOptions::rip();
        assert_eq!(options.hop_limit, Some(15));
        assert_eq!(options.max_iterations, MAX_ITERATIONS);
    }

    #[test]
    fn segment_duration_scales_with_weight() {
        let config = SimulatorConfig::default();
        assert_eq!(config.segment_duration(5), Duration::from_millis(1000));
        assert_eq!(config.segment_duration(1), Duration::from_millis(200));
    }
}
