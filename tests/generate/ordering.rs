use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rbacgen::core::{MarkerSchema, aggregate, emit, parse_marker};
use rbacgen::host::{InMemoryGraph, InMemoryUnit};

use crate::run;

const MARKERS: &[&str] = &[
    "+rbac:groups=apps,resources=deployments,verbs=get;list",
    "+rbac:groups=apps,resources=deployments,verbs=watch",
    "+rbac:groups=apps,resources=statefulsets,verbs=get",
    "+rbac:groups=core,resources=pods,verbs=get;list;watch",
    "+rbac:groups=,resources=pods,verbs=get",
    "+rbac:resources=pods,urls=/x,verbs=get",
    "+rbac:groups=coordination.k8s.io,resources=leases,resourceNames=leader-lock,verbs=get;update",
    "+rbac:groups=coordination.k8s.io,resources=leases,verbs=create",
    "+rbac:urls=/healthz,verbs=get",
    "+rbac:urls=/metrics,verbs=get",
    "+rbac:urls=/healthz,verbs=head",
    "+rbac:groups=batch,resources=jobs;cronjobs,verbs=*",
];

fn unit_id(index: usize) -> String {
    format!("pkg/unit{index:02}")
}

/// One unit per marker, visited starting from roots in `order`.
fn graph_in_order(order: &[usize]) -> InMemoryGraph {
    let mut graph = InMemoryGraph::new();
    for (index, marker) in MARKERS.iter().enumerate() {
        graph.add_unit(InMemoryUnit::new(unit_id(index)).with_comment(*marker, index + 1, 1));
    }
    graph.with_roots(order.iter().map(|index| unit_id(*index)))
}

#[test]
fn test_repeated_runs_are_identical() {
    let order: Vec<usize> = (0..MARKERS.len()).collect();
    let graph = graph_in_order(&order);

    let first = run(&graph);
    let second = run(&graph);

    assert_eq!(first, second);
    assert_eq!(
        first.document.to_json_pretty().unwrap(),
        second.document.to_json_pretty().unwrap()
    );
}

#[test]
fn test_reversed_visit_order_gives_same_output() {
    let forward: Vec<usize> = (0..MARKERS.len()).collect();
    let backward: Vec<usize> = forward.iter().rev().copied().collect();

    let a = run(&graph_in_order(&forward));
    let b = run(&graph_in_order(&backward));

    assert_eq!(a, b);
    assert_eq!(a.errors.len(), 2);
}

#[test]
fn test_import_chain_gives_same_output_as_flat_roots() {
    let mut chained = InMemoryGraph::new();
    for (index, marker) in MARKERS.iter().enumerate() {
        let mut unit = InMemoryUnit::new(unit_id(index)).with_comment(*marker, index + 1, 1);
        if index + 1 < MARKERS.len() {
            unit = unit.with_import(unit_id(index + 1));
        }
        chained.add_unit(unit);
    }
    let chained = chained.with_roots([unit_id(0)]);

    let flat: Vec<usize> = (0..MARKERS.len()).collect();

    assert_eq!(run(&chained), run(&graph_in_order(&flat)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_visit_order_does_not_change_document(
        order in Just((0..MARKERS.len()).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let baseline: Vec<usize> = (0..MARKERS.len()).collect();
        let expected = run(&graph_in_order(&baseline));
        let actual = run(&graph_in_order(&order));

        prop_assert_eq!(
            expected.document.to_json_pretty().unwrap(),
            actual.document.to_json_pretty().unwrap()
        );
        prop_assert_eq!(expected.errors, actual.errors);
    }

    #[test]
    fn prop_rule_order_does_not_change_document(
        markers in Just(MARKERS.to_vec()).prop_shuffle(),
    ) {
        let schema = MarkerSchema::default();
        let parse_all = |markers: &[&str]| {
            aggregate(markers.iter().filter_map(|m| parse_marker(&schema, m).ok()))
        };

        let expected = emit(&parse_all(MARKERS));
        let actual = emit(&parse_all(markers.as_slice()));

        prop_assert_eq!(expected, actual);
    }
}
