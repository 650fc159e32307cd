//! End-to-end generation: collect → parse → aggregate → emit.

use log::{debug, trace};
use rayon::prelude::*;

use crate::config::Config;
use crate::core::collect::{CancelSignal, SourceGraph, collect_occurrences};
use crate::core::emit::{ClusterRole, Document, emit};
use crate::core::extract::MarkerOccurrence;
use crate::core::marker::{MarkerFamily, RbacMarkers};
use crate::core::rules::{Rule, RuleSet, aggregate};
use crate::issues::{MarkerError, MarkerErrorKind, PipelineError};

/// Best-effort result of one run.
///
/// The document contains every rule that parsed; `errors` lists every marker that did not.
/// Callers decide whether any error should block use of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    pub document: Document,
    /// Sorted by unit, line, column, then kind.
    pub errors: Vec<MarkerError>,
}

impl GenerationOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Run the full pipeline over `graph` with the `+rbac:` family described by `config`.
pub fn generate<G: SourceGraph>(
    graph: &G,
    config: &Config,
    cancel: &CancelSignal,
) -> Result<GenerationOutput, PipelineError> {
    let family = RbacMarkers::new(config.marker_schema());
    generate_with(graph, &family, cancel)
}

/// Run the pipeline with an explicit marker family.
pub fn generate_with<G: SourceGraph, F: MarkerFamily>(
    graph: &G,
    family: &F,
    cancel: &CancelSignal,
) -> Result<GenerationOutput, PipelineError> {
    let occurrences = collect_occurrences(graph, family.prefix(), cancel)?;
    debug!("found {} marker occurrences", occurrences.len());

    let (rule_set, mut errors) = parse_occurrences(family, occurrences);
    errors.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let document = emit(&rule_set);
    debug!(
        "emitted {} rules with {} marker errors",
        document.len(),
        errors.len()
    );

    Ok(GenerationOutput { document, errors })
}

/// Run the pipeline and wrap the document in a ClusterRole named by `config.role_name`.
pub fn generate_role<G: SourceGraph>(
    graph: &G,
    config: &Config,
    cancel: &CancelSignal,
) -> Result<(ClusterRole, Vec<MarkerError>), PipelineError> {
    let output = generate(graph, config, cancel)?;
    Ok((
        ClusterRole::new(config.role_name.clone(), output.document),
        output.errors,
    ))
}

/// Parse every occurrence, keeping successes and failures apart.
fn parse_occurrences<F: MarkerFamily>(
    family: &F,
    occurrences: Vec<MarkerOccurrence>,
) -> (RuleSet, Vec<MarkerError>) {
    let results: Vec<Result<Rule, MarkerError>> = occurrences
        .into_par_iter()
        .map(|occurrence| parse_occurrence(family, occurrence))
        .collect();

    let mut rules = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(rule) => rules.push(rule),
            Err(err) => {
                trace!("{}", err);
                errors.push(err);
            }
        }
    }

    (aggregate(rules), errors)
}

fn parse_occurrence<F: MarkerFamily>(
    family: &F,
    occurrence: MarkerOccurrence,
) -> Result<Rule, MarkerError> {
    let MarkerOccurrence { text, location } = occurrence;
    let parsed = family.parse_line(&text).unwrap_or_else(|| {
        Err(MarkerErrorKind::MalformedMarkerPrefix(format!(
            "expected prefix '{}'",
            family.prefix()
        )))
    });
    parsed.map_err(|kind| MarkerError::new(location, kind, text))
}
