//! Typed permission rules and their aggregation into a canonical rule set.
//!
//! A [`Rule`] is either a resource rule (API groups, resources, resource names) or a URL
//! rule (non-resource URLs). The two shapes are separate types, so a rule can never
//! populate both.
//!
//! Two rules are *mergeable* when they have the same [`RuleKey`]. Merging unions their
//! verbs. The union is commutative and associative, which is why the collector can
//! gather rules in any order.

use std::collections::{BTreeMap, BTreeSet};

/// Permission on API groups and resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRule {
    pub groups: BTreeSet<String>,
    pub resources: BTreeSet<String>,
    pub resource_names: BTreeSet<String>,
    pub verbs: BTreeSet<String>,
}

/// Permission on non-resource URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlRule {
    pub urls: BTreeSet<String>,
    pub verbs: BTreeSet<String>,
}

/// A single permission unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    Resource(ResourceRule),
    Url(UrlRule),
}

/// The fields that decide whether two rules are mergeable. Verbs are excluded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKey {
    Resource {
        groups: BTreeSet<String>,
        resources: BTreeSet<String>,
        resource_names: BTreeSet<String>,
    },
    Url {
        urls: BTreeSet<String>,
    },
}

impl Rule {
    pub fn verbs(&self) -> &BTreeSet<String> {
        match self {
            Rule::Resource(rule) => &rule.verbs,
            Rule::Url(rule) => &rule.verbs,
        }
    }

    pub fn is_url_rule(&self) -> bool {
        matches!(self, Rule::Url(_))
    }

    pub fn key(&self) -> RuleKey {
        match self {
            Rule::Resource(rule) => RuleKey::Resource {
                groups: rule.groups.clone(),
                resources: rule.resources.clone(),
                resource_names: rule.resource_names.clone(),
            },
            Rule::Url(rule) => RuleKey::Url {
                urls: rule.urls.clone(),
            },
        }
    }

    /// Split into merge key and verbs.
    fn into_parts(self) -> (RuleKey, BTreeSet<String>) {
        match self {
            Rule::Resource(rule) => (
                RuleKey::Resource {
                    groups: rule.groups,
                    resources: rule.resources,
                    resource_names: rule.resource_names,
                },
                rule.verbs,
            ),
            Rule::Url(rule) => (RuleKey::Url { urls: rule.urls }, rule.verbs),
        }
    }

    fn from_parts(key: RuleKey, verbs: BTreeSet<String>) -> Self {
        match key {
            RuleKey::Resource {
                groups,
                resources,
                resource_names,
            } => Rule::Resource(ResourceRule {
                groups,
                resources,
                resource_names,
                verbs,
            }),
            RuleKey::Url { urls } => Rule::Url(UrlRule { urls, verbs }),
        }
    }

    pub fn is_mergeable_with(&self, other: &Rule) -> bool {
        match (self, other) {
            (Rule::Resource(a), Rule::Resource(b)) => {
                a.groups == b.groups
                    && a.resources == b.resources
                    && a.resource_names == b.resource_names
            }
            (Rule::Url(a), Rule::Url(b)) => a.urls == b.urls,
            _ => false,
        }
    }

    /// Merge two rules into one whose verbs are the union of both.
    ///
    /// Returns both rules unchanged when they are not mergeable.
    pub fn merge(self, other: Rule) -> Result<Rule, (Rule, Rule)> {
        if !self.is_mergeable_with(&other) {
            return Err((self, other));
        }
        let (key, mut verbs) = self.into_parts();
        verbs.extend(other.into_parts().1);
        Ok(Rule::from_parts(key, verbs))
    }
}

/// Fully reduced collection of rules: no two stored rules are mergeable.
///
/// Every insertion merges immediately, so the set is at its fixed point after each call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    entries: BTreeMap<RuleKey, BTreeSet<String>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule: Rule) {
        let (key, verbs) = rule.into_parts();
        self.entries.entry(key).or_default().extend(verbs);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rules in key order. Use the emitter for the canonical document order.
    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.entries
            .iter()
            .map(|(key, verbs)| Rule::from_parts(key.clone(), verbs.clone()))
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

/// Merge parsed rules exhaustively into a canonical rule set.
pub fn aggregate(rules: impl IntoIterator<Item = Rule>) -> RuleSet {
    rules.into_iter().collect()
}
