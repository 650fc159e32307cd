use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rbacgen::{
    CancelSignal, Config, MarkerErrorKind, generate_role,
    host::DirectoryGraph,
};

use crate::SourceTree;

const DEPLOYMENT_CONTROLLER: &str = r#"package controller

import "context"

// DeploymentReconciler reconciles Deployments.
type DeploymentReconciler struct{}

// +rbac:groups=apps,resources=deployments,verbs=get;list;watch
// +rbac:groups=apps,resources=deployments/status,verbs=get;update;patch
// +rbac:groups=core,resources=events,verbs=create;patch

// Reconcile drives a Deployment toward its desired state.
func (r *DeploymentReconciler) Reconcile(ctx context.Context) error {
	url := "http://example.com/+rbac:urls=/nope,verbs=get"
	_ = url
	return nil
}
"#;

const METRICS_SERVER: &str = r#"package metrics

/*
+rbac:urls=/metrics,verbs=get
*/

// +rbac:groups=apps,resources=deployments,verbs=update
func Serve() {}
"#;

#[test]
fn test_markers_collected_from_files() -> Result<()> {
    let tree = SourceTree::with_file("internal/controller/deployment.go", DEPLOYMENT_CONTROLLER)?;
    tree.write_file("internal/metrics/server.go", METRICS_SERVER)?;

    let output = tree.generate()?;

    assert!(output.errors.is_empty());
    assert_snapshot!(output.document.to_json_pretty()?.trim_end(), @r#"
    [
      {
        "apiGroups": [
          ""
        ],
        "resources": [
          "events"
        ],
        "verbs": [
          "create",
          "patch"
        ]
      },
      {
        "apiGroups": [
          "apps"
        ],
        "resources": [
          "deployments"
        ],
        "verbs": [
          "get",
          "list",
          "update",
          "watch"
        ]
      },
      {
        "apiGroups": [
          "apps"
        ],
        "resources": [
          "deployments/status"
        ],
        "verbs": [
          "get",
          "patch",
          "update"
        ]
      },
      {
        "nonResourceURLs": [
          "/metrics"
        ],
        "verbs": [
          "get"
        ]
      }
    ]
    "#);

    Ok(())
}

#[test]
fn test_errors_carry_file_positions() -> Result<()> {
    let tree = SourceTree::with_file(
        "api/v1/types.go",
        "package v1\n\n// +rbac:groups=apps,verbs=get\ntype Foo struct{}\n",
    )?;

    let output = tree.generate()?;

    assert!(output.document.is_empty());
    assert_eq!(output.errors.len(), 1);
    let err = &output.errors[0];
    assert_eq!(err.unit(), "api/v1/types.go");
    assert_eq!((err.line(), err.column()), (3, 4));
    assert!(matches!(err.kind, MarkerErrorKind::MissingArgument(_)));
    assert_eq!(
        err.to_string(),
        "api/v1/types.go:3:4: missing required argument 'resources' (+rbac:groups=apps,verbs=get)"
    );

    Ok(())
}

#[test]
fn test_errors_name_the_file_within_a_package() -> Result<()> {
    let tree = SourceTree::with_file(
        "ctrl/a.go",
        "package ctrl\n\n// +rbac:groups=apps,verbs=get\n",
    )?;
    tree.write_file(
        "ctrl/b.go",
        "package ctrl\n\n// +rbac:groups=batch,verbs=get\n",
    )?;

    let output = tree.generate()?;

    let rendered: Vec<String> = output.errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "ctrl/a.go:3:4: missing required argument 'resources' (+rbac:groups=apps,verbs=get)",
            "ctrl/b.go:3:4: missing required argument 'resources' (+rbac:groups=batch,verbs=get)",
        ]
    );

    Ok(())
}

#[test]
fn test_test_files_are_skipped() -> Result<()> {
    let tree = SourceTree::with_file(
        "pkg/foo_test.go",
        "package pkg\n\n// +rbac:resources=pods,verbs=delete\n",
    )?;

    let output = tree.generate()?;

    assert!(output.document.is_empty());
    Ok(())
}

#[test]
fn test_cluster_role_from_directory() -> Result<()> {
    let tree = SourceTree::with_file(
        "cmd/main.go",
        "package main\n\n// +rbac:urls=/healthz,verbs=get\nfunc main() {}\n",
    )?;
    let config = Config {
        role_name: "probe-reader".to_string(),
        ..Default::default()
    };
    let graph = DirectoryGraph::scan(tree.root(), &config)?;

    let (role, errors) = generate_role(&graph, &config, &CancelSignal::new())?;

    assert!(errors.is_empty());
    assert_snapshot!(role.to_json_pretty()?.trim_end(), @r#"
    {
      "apiVersion": "rbac.authorization.k8s.io/v1",
      "kind": "ClusterRole",
      "metadata": {
        "name": "probe-reader"
      },
      "rules": [
        {
          "nonResourceURLs": [
            "/healthz"
          ],
          "verbs": [
            "get"
          ]
        }
      ]
    }
    "#);

    Ok(())
}

#[test]
fn test_files_with_other_extensions_are_ignored() -> Result<()> {
    let tree = SourceTree::with_file("docs/guide.md", "// +rbac:resources=pods,verbs=get\n")?;

    let output = tree.generate()?;

    assert!(output.document.is_empty());
    assert!(output.errors.is_empty());
    Ok(())
}
