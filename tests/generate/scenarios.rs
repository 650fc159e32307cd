use pretty_assertions::assert_eq;
use rbacgen::core::ArgumentKey;
use rbacgen::{MarkerErrorKind, host::InMemoryUnit};
use serde_json::json;

use crate::{graph_of, run};

#[test]
fn test_verbs_merge_across_units() {
    let graph = graph_of(&[
        ("a", "+rbac:groups=apps,resources=deployments,verbs=get;list"),
        ("b", "+rbac:groups=apps,resources=deployments,verbs=watch"),
    ]);

    let output = run(&graph);

    assert!(output.errors.is_empty());
    assert_eq!(
        serde_json::to_value(&output.document).unwrap(),
        json!([{
            "apiGroups": ["apps"],
            "resources": ["deployments"],
            "verbs": ["get", "list", "watch"]
        }])
    );
}

#[test]
fn test_url_rule() {
    let output = run(&graph_of(&[("a", "+rbac:urls=/healthz,verbs=get")]));

    assert!(output.errors.is_empty());
    assert_eq!(
        serde_json::to_value(&output.document).unwrap(),
        json!([{ "nonResourceURLs": ["/healthz"], "verbs": ["get"] }])
    );
}

#[test]
fn test_conflicting_shape_yields_error_only() {
    let output = run(&graph_of(&[("a", "+rbac:resources=pods,urls=/x,verbs=get")]));

    assert!(output.document.is_empty());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, MarkerErrorKind::ConflictingRuleShape);
    assert_eq!(output.errors[0].unit(), "a");
}

#[test]
fn test_empty_list_element_yields_error_only() {
    let output = run(&graph_of(&[("a", "+rbac:groups=,resources=pods,verbs=get")]));

    assert!(output.document.is_empty());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].kind,
        MarkerErrorKind::EmptyListElement(ArgumentKey::Groups)
    );
    assert_eq!(output.errors[0].text, "+rbac:groups=,resources=pods,verbs=get");
}

#[test]
fn test_no_record_has_both_shapes() {
    let output = run(&graph_of(&[
        ("a", "+rbac:groups=apps,resources=deployments,verbs=get"),
        ("b", "+rbac:urls=/metrics;/healthz,verbs=get"),
        ("c", "+rbac:resources=pods,urls=/x,verbs=get"),
        ("d", "+rbac:groups=core,resources=configmaps,resourceNames=lock,verbs=update"),
    ]));

    for record in output.document.rules() {
        assert!(!(record.resources.is_some() && record.non_resource_urls.is_some()));
    }
    assert_eq!(output.document.len(), 3);
}

#[test]
fn test_documentation_lines_are_ignored() {
    let unit = InMemoryUnit::new("pkg/controller").with_comment(
        "FooReconciler reconciles Foo objects.\nIt mentions rbac but is not a marker.\n+rbac:resources=foos,verbs=get",
        10,
        3,
    );
    let graph = rbacgen::host::InMemoryGraph::new().with_unit(unit);

    let output = run(&graph);

    assert!(output.errors.is_empty());
    assert_eq!(output.document.len(), 1);
}

#[test]
fn test_error_positions_point_at_marker() {
    let unit = InMemoryUnit::new("pkg/controller")
        .with_comment("Reconcile loop.\n  +rbac:resources=pods,verbs=", 7, 3);
    let graph = rbacgen::host::InMemoryGraph::new().with_unit(unit);

    let output = run(&graph);

    assert_eq!(output.errors.len(), 1);
    let err = &output.errors[0];
    assert_eq!((err.line(), err.column()), (8, 3));
    assert_eq!(err.kind, MarkerErrorKind::EmptyListElement(ArgumentKey::Verbs));
}
