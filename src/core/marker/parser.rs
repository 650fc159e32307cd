//! Parsing of one marker line into a typed [`Rule`].
//!
//! ```text
//! +rbac:groups=apps,resources=deployments;statefulsets,verbs=get;list;watch
//! +rbac:urls=/healthz;/readyz,verbs=get
//! ```
//!
//! Arguments are separated by `,`, list items by `;`. There is no escaping.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::core::marker::grammar::{ArgumentKey, MarkerSchema};
use crate::core::rules::{ResourceRule, Rule, UrlRule};
use crate::issues::MarkerErrorKind;

static ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-.*/]+$").unwrap());

/// Alias accepted for the Kubernetes core API group, which is the empty string on the wire.
const CORE_GROUP_ALIAS: &str = "core";

/// Parse a trimmed marker line.
///
/// The caller has already checked that `text` starts with the schema prefix. Returns the
/// first grammar violation found; a line yields at most one error.
pub fn parse_marker(schema: &MarkerSchema, text: &str) -> Result<Rule, MarkerErrorKind> {
    let body = text.strip_prefix(schema.prefix()).ok_or_else(|| {
        MarkerErrorKind::MalformedMarkerPrefix(format!(
            "expected prefix '{}'",
            schema.prefix()
        ))
    })?;
    parse_body(schema, body)
}

/// Parse the argument list following the prefix.
pub(crate) fn parse_body(schema: &MarkerSchema, body: &str) -> Result<Rule, MarkerErrorKind> {
    let body = body.trim_end();
    if body.is_empty() {
        return Err(MarkerErrorKind::MalformedMarkerPrefix(
            "no arguments after prefix".to_string(),
        ));
    }

    let raw_args = split_arguments(body)?;

    // Resolve every key before looking at values so an unknown key is always reported
    let mut resolved = Vec::with_capacity(raw_args.len());
    for (key, value) in raw_args {
        let arg = schema
            .argument(key)
            .ok_or_else(|| MarkerErrorKind::UnknownArgument(key.to_string()))?;
        resolved.push((arg, value));
    }

    let mut values: BTreeMap<ArgumentKey, BTreeSet<String>> = BTreeMap::new();
    for (arg, value) in &resolved {
        let items = split_list(*arg, value)?;
        values.entry(*arg).or_default().extend(items);
    }

    if let Some(bad) = values
        .values()
        .flatten()
        .find(|item| !ITEM_REGEX.is_match(item))
    {
        return Err(MarkerErrorKind::MalformedMarkerPrefix(format!(
            "invalid list item '{}'",
            bad
        )));
    }

    build_rule(values)
}

/// Split `k=v,k=v` into pairs. Keys are not resolved here; only an empty key is rejected.
fn split_arguments(body: &str) -> Result<Vec<(&str, &str)>, MarkerErrorKind> {
    body.split(',')
        .map(|arg| {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                MarkerErrorKind::MalformedMarkerPrefix(format!(
                    "argument '{}' is missing '='",
                    arg
                ))
            })?;
            if key.is_empty() {
                return Err(MarkerErrorKind::MalformedMarkerPrefix(format!(
                    "argument '{}' has no name",
                    arg
                )));
            }
            Ok((key, value))
        })
        .collect()
}

fn split_list(key: ArgumentKey, value: &str) -> Result<Vec<String>, MarkerErrorKind> {
    value
        .split(';')
        .map(|item| {
            if item.is_empty() {
                Err(MarkerErrorKind::EmptyListElement(key))
            } else {
                Ok(item.to_string())
            }
        })
        .collect()
}

fn build_rule(
    mut values: BTreeMap<ArgumentKey, BTreeSet<String>>,
) -> Result<Rule, MarkerErrorKind> {
    if values.contains_key(&ArgumentKey::Urls) && values.keys().any(ArgumentKey::is_resource_only)
    {
        return Err(MarkerErrorKind::ConflictingRuleShape);
    }

    let mut take = |key: ArgumentKey| values.remove(&key);

    let urls = take(ArgumentKey::Urls);
    let groups = take(ArgumentKey::Groups);
    let resources = take(ArgumentKey::Resources);
    let resource_names = take(ArgumentKey::ResourceNames);
    let verbs = take(ArgumentKey::Verbs);

    if let Some(urls) = urls {
        let verbs = verbs.ok_or(MarkerErrorKind::MissingArgument(ArgumentKey::Verbs))?;
        return Ok(Rule::Url(UrlRule { urls, verbs }));
    }

    let resources = resources.ok_or(MarkerErrorKind::MissingArgument(ArgumentKey::Resources))?;
    let verbs = verbs.ok_or(MarkerErrorKind::MissingArgument(ArgumentKey::Verbs))?;
    let groups = groups
        .unwrap_or_default()
        .into_iter()
        .map(|group| {
            if group == CORE_GROUP_ALIAS {
                String::new()
            } else {
                group
            }
        })
        .collect();

    Ok(Rule::Resource(ResourceRule {
        groups,
        resources,
        resource_names: resource_names.unwrap_or_default(),
        verbs,
    }))
}
