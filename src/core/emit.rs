//! Canonical ordering and serialization of a reduced rule set.
//!
//! The document order is total: resource rules before URL rules. Resource rules are then
//! ordered by joined groups, resources, resource names and finally verbs; URL rules by
//! joined URLs and then verbs. "Joined" means sorted lexicographically and joined with `,`,
//! which cannot appear inside an item. The same logical rule set therefore always renders
//! to the same bytes.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::rules::{Rule, RuleSet};

pub const RBAC_API_VERSION: &str = "rbac.authorization.k8s.io/v1";
pub const CLUSTER_ROLE_KIND: &str = "ClusterRole";

/// One rule in wire form. List fields are always sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_names: Option<Vec<String>>,
    #[serde(rename = "nonResourceURLs", skip_serializing_if = "Option::is_none")]
    pub non_resource_urls: Option<Vec<String>>,
    pub verbs: Vec<String>,
}

impl PolicyRecord {
    fn from_rule(rule: &Rule) -> Self {
        match rule {
            Rule::Resource(rule) => Self {
                api_groups: Some(sorted(&rule.groups)),
                resources: Some(sorted(&rule.resources)),
                resource_names: (!rule.resource_names.is_empty())
                    .then(|| sorted(&rule.resource_names)),
                non_resource_urls: None,
                verbs: sorted(&rule.verbs),
            },
            Rule::Url(rule) => Self {
                api_groups: None,
                resources: None,
                resource_names: None,
                non_resource_urls: Some(sorted(&rule.urls)),
                verbs: sorted(&rule.verbs),
            },
        }
    }

    pub fn is_url_rule(&self) -> bool {
        self.non_resource_urls.is_some()
    }
}

/// The ordered policy document. Serializes as a bare sequence of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    rules: Vec<PolicyRecord>,
}

impl Document {
    pub fn rules(&self) -> &[PolicyRecord] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize policy document")?;
        Ok(format!("{}\n", content))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectMeta {
    pub name: String,
}

/// Kubernetes ClusterRole wrapping a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRole {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub rules: Document,
}

impl ClusterRole {
    pub fn new(name: impl Into<String>, rules: Document) -> Self {
        Self {
            api_version: RBAC_API_VERSION.to_string(),
            kind: CLUSTER_ROLE_KIND.to_string(),
            metadata: ObjectMeta { name: name.into() },
            rules,
        }
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize ClusterRole")?;
        Ok(format!("{}\n", content))
    }
}

/// Order a reduced rule set into the canonical document.
pub fn emit(rule_set: &RuleSet) -> Document {
    let mut rules: Vec<Rule> = rule_set.rules().collect();
    rules.sort_by(compare_rules);
    Document {
        rules: rules.iter().map(PolicyRecord::from_rule).collect(),
    }
}

/// Total order over rules, see module docs.
///
/// Joined strings cannot tell an empty group list from `[""]`, so ties fall back to the
/// structural [`RuleKey`](crate::core::rules::RuleKey) order and then the verb sets.
pub fn compare_rules(a: &Rule, b: &Rule) -> Ordering {
    compare_joined(a, b)
        .then_with(|| a.key().cmp(&b.key()))
        .then_with(|| a.verbs().cmp(b.verbs()))
}

fn compare_joined(a: &Rule, b: &Rule) -> Ordering {
    match (a, b) {
        (Rule::Resource(a), Rule::Resource(b)) => joined(&a.groups)
            .cmp(&joined(&b.groups))
            .then_with(|| joined(&a.resources).cmp(&joined(&b.resources)))
            .then_with(|| joined(&a.resource_names).cmp(&joined(&b.resource_names)))
            .then_with(|| joined(&a.verbs).cmp(&joined(&b.verbs))),
        (Rule::Url(a), Rule::Url(b)) => joined(&a.urls)
            .cmp(&joined(&b.urls))
            .then_with(|| joined(&a.verbs).cmp(&joined(&b.verbs))),
        (Rule::Resource(_), Rule::Url(_)) => Ordering::Less,
        (Rule::Url(_), Rule::Resource(_)) => Ordering::Greater,
    }
}

fn sorted(items: &BTreeSet<String>) -> Vec<String> {
    // BTreeSet iterates in lexicographic byte order
    items.iter().cloned().collect()
}

fn joined(items: &BTreeSet<String>) -> String {
    sorted(items).join(",")
}
