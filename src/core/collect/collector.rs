//! Parallel collection of marker occurrences across a source graph.

use log::debug;
use rayon::prelude::*;

use crate::core::collect::cancel::CancelSignal;
use crate::core::collect::graph::{SourceGraph, SourceUnit, reachable_units};
use crate::core::extract::{MarkerOccurrence, extract_occurrences};
use crate::issues::PipelineError;

/// Visit every reachable unit once and gather all marker occurrences.
///
/// Units are extracted in parallel. Each worker returns its own list and the lists are
/// concatenated once every unit is done, so no partial interleaving is observable. The
/// resulting order depends on scheduling; the aggregator makes it irrelevant.
///
/// The cancel signal is checked before and after each unit is read, so a trip during a slow
/// read is not masked by a unit that already finished.
pub fn collect_occurrences<G: SourceGraph>(
    graph: &G,
    prefix: &str,
    cancel: &CancelSignal,
) -> Result<Vec<MarkerOccurrence>, PipelineError> {
    let units = reachable_units(graph)?;
    debug!("collecting markers from {} units", units.len());

    let per_unit: Vec<Vec<MarkerOccurrence>> = units
        .par_iter()
        .map(|unit| {
            cancel.check()?;
            let blocks = unit
                .comment_blocks()
                .map_err(|source| PipelineError::UnreadableUnit {
                    unit: unit.id().to_string(),
                    source,
                })?;
            cancel.check()?;
            Ok(extract_occurrences(unit.id(), &blocks, prefix))
        })
        .collect::<Result<_, PipelineError>>()?;

    Ok(per_unit.into_iter().flatten().collect())
}
