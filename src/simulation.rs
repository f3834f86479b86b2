use std::fmt;

use serde::Serialize;

use crate::RouterId;

/// Where a router sits in the packet's journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPhase {
    LeavesSource,
    ForwardedThrough,
    ArrivesAtDestination,
}

/// One discrete hand-off for the external playback layer. Carries no timing;
/// pacing comes from `SimulatorConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationStep {
    pub step: usize,
    pub node: RouterId,
    pub phase: StepPhase,
}

impl fmt::Display for SimulationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            StepPhase::LeavesSource => write!(f, "Packet leaves source router {}", self.node),
            StepPhase::ForwardedThrough => {
                write!(f, "Packet forwarded through router {}", self.node)
            }
            StepPhase::ArrivesAtDestination => {
                write!(f, "Packet arrives at destination router {}", self.node)
            }
        }
    }
}

/// Turns a routing path into the ordered hand-off sequence. Pure function of
/// the path; an empty path yields no steps.
pub fn build_steps(path: &[RouterId]) -> Vec<SimulationStep> {
    path.iter()
        .enumerate()
        .map(|(index, node)| {
            let phase = if index == 0 {
                StepPhase::LeavesSource
            } else if index == path.len() - 1 {
                StepPhase::ArrivesAtDestination
            } else {
                StepPhase::ForwardedThrough
            };
            SimulationStep {
                step: index,
                node: node.clone(),
                phase,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(ids: &[&str]) -> Vec<RouterId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn labels_source_interior_and_destination() {
        let steps = build_steps(&path(&["A", "B", "C", "F"]));
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].phase, StepPhase::LeavesSource);
        assert_eq!(steps[1].phase, StepPhase::ForwardedThrough);
        assert_eq!(steps[2].phase, StepPhase::ForwardedThrough);
        assert_eq!(steps[3].phase, StepPhase::ArrivesAtDestination);
        assert_eq!(steps[3].step, 3);
        assert_eq!(
            steps[0].to_string(),
            "Packet leaves source router A"
        );
        assert_eq!(
            steps[3].to_string(),
            "Packet arrives at destination router F"
        );
    }

    #[test]
    fn two_hop_path_has_no_interior_steps() {
        let steps = build_steps(&path(&["A", "B"]));
        assert_eq!(steps[0].phase, StepPhase::LeavesSource);
        assert_eq!(steps[1].phase, StepPhase::ArrivesAtDestination);
    }

    #[test]
    fn single_router_path_leaves_the_source() {
        let steps = build_steps(&path(&["A"]));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].phase, StepPhase::LeavesSource);
    }

    #[test]
    fn empty_path_yields_no_steps() {
        assert!(build_steps(&[]).is_empty());
    }
}
