//! End-to-end checks of the solve pipeline on the sample lab topology:
//! {A-B:5, B-C:3, A-D:2, B-E:4, C-F:1, D-E:3, E-F:6}.

use routing_lab::{
    Cost, Graph, INFINITY, Protocol, SolveData, SolveOptions, StepPhase, TopologyError,
    build_steps, solve,
};

fn path_weight(graph: &Graph, path: &[String]) -> Cost {
    path.windows(2)
        .map(|pair| {
            graph
                .link_between(&pair[0], &pair[1])
                .expect("path follows existing links")
                .weight
        })
        .sum()
}

#[test]
fn link_state_finds_the_nine_weight_path() {
    let graph = Graph::sample();
    let result = solve(&graph, "A", "F", Protocol::LinkState, &SolveOptions::default()).unwrap();

    assert_eq!(result.path, ["A", "B", "C", "F"]);
    assert_eq!(path_weight(&graph, &result.path), 9);

    let SolveData::LinkState { distances, .. } = &result.data else {
        panic!("expected link-state data");
    };
    // Reported distance matches the weight sum along the returned path.
    assert_eq!(distances["F"], 9);
}

#[test]
fn distance_vector_agrees_with_link_state_on_the_sample() {
    let graph = Graph::sample();
    let result = solve(
        &graph,
        "A",
        "F",
        Protocol::DistanceVector,
        &SolveOptions::default(),
    )
    .unwrap();

    assert_eq!(result.path, ["A", "B", "C", "F"]);
    let SolveData::DistanceVector { tables, converged, .. } = &result.data else {
        panic!("expected distance-vector data");
    };
    assert!(*converged);
    assert_eq!(tables["A"].distance_to("F"), 9);
}

#[test]
fn solve_is_idempotent_on_an_unmodified_graph() {
    let graph = Graph::sample();
    for protocol in [Protocol::LinkState, Protocol::DistanceVector] {
        let first = solve(&graph, "A", "F", protocol, &SolveOptions::default()).unwrap();
        let second = solve(&graph, "A", "F", protocol, &SolveOptions::default()).unwrap();
        assert_eq!(first.path, second.path);
        assert_eq!(first.data, second.data);
        assert_eq!(first.trace, second.trace);
    }
}

#[test]
fn unreachable_destination_is_an_empty_path_not_an_error() {
    let mut graph = Graph::sample();
    let isolated = graph.add_router();
    assert_eq!(isolated, "G");

    for protocol in [Protocol::LinkState, Protocol::DistanceVector] {
        let result = solve(&graph, "A", &isolated, protocol, &SolveOptions::default()).unwrap();
        assert!(result.path.is_empty(), "{protocol} should find no path");
        match &result.data {
            SolveData::LinkState { distances, .. } => {
                assert_eq!(distances[&isolated], INFINITY);
            }
            SolveData::DistanceVector { tables, .. } => {
                assert_eq!(tables["A"].distance_to(&isolated), INFINITY);
            }
        }
        assert!(build_steps(&result.path).is_empty());
    }
}

#[test]
fn unknown_endpoints_are_structural_errors() {
    let graph = Graph::sample();
    assert_eq!(
        solve(&graph, "Z", "F", Protocol::LinkState, &SolveOptions::default()),
        Err(TopologyError::UnknownRouter("Z".to_string()))
    );
    assert_eq!(
        solve(&graph, "A", "Z", Protocol::LinkState, &SolveOptions::default()),
        Err(TopologyError::UnknownRouter("Z".to_string()))
    );
}

#[test]
fn rip_mode_never_reports_finite_distances_above_the_ceiling() {
    let graph = Graph::sample();
    let result = solve(&graph, "A", "F", Protocol::DistanceVector, &SolveOptions::rip()).unwrap();
    let SolveData::DistanceVector { tables, .. } = &result.data else {
        panic!("expected distance-vector data");
    };
    for node in graph.router_ids() {
        for destination in graph.router_ids() {
            let distance = tables[node].distance_to(destination);
            assert!(distance == INFINITY || distance <= 15);
        }
    }
    // A-F needs multiple hops; under the RIP cutoff it is unreachable even
    // though a finite-weight path exists.
    assert_eq!(tables["A"].distance_to("F"), INFINITY);
    assert!(result.path.is_empty());
}

#[test]
fn steps_mirror_the_solved_path() {
    let graph = Graph::sample();
    let result = solve(&graph, "A", "F", Protocol::LinkState, &SolveOptions::default()).unwrap();
    let steps = build_steps(&result.path);

    assert_eq!(steps.len(), result.path.len());
    for (step, node) in steps.iter().zip(&result.path) {
        assert_eq!(&step.node, node);
    }
    assert_eq!(steps.first().unwrap().phase, StepPhase::LeavesSource);
    assert_eq!(steps.last().unwrap().phase, StepPhase::ArrivesAtDestination);
}

#[test]
fn edits_are_all_or_nothing() {
    let mut graph = Graph::sample();
    let links_before = graph.links().len();
    let routers_before = graph.routers().len();

    assert!(graph.add_link("B", "A", 1, None).is_err());
    assert!(graph.add_link("A", "A", 1, None).is_err());
    assert!(graph.add_link("A", "Q", 1, None).is_err());

    assert_eq!(graph.links().len(), links_before);
    assert_eq!(graph.routers().len(), routers_before);

    // A rejected edit must not change solver output either.
    let result = solve(&graph, "A", "F", Protocol::LinkState, &SolveOptions::default()).unwrap();
    assert_eq!(result.path, ["A", "B", "C", "F"]);
}
