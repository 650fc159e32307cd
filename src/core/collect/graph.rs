//! Host collaborator interface: the graph of source units.

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::core::extract::CommentBlock;
use crate::issues::PipelineError;

/// One independently loadable compilation unit (e.g. a package).
pub trait SourceUnit: Sync {
    /// Stable identifier, used in error positions.
    fn id(&self) -> &str;

    /// Ids of units this one imports. Ids unknown to the graph are ignored.
    fn imports(&self) -> &[String];

    /// Comment blocks attached to the unit's declarations.
    ///
    /// An error here means the unit cannot be read at all and stops the run.
    fn comment_blocks(&self) -> anyhow::Result<Vec<CommentBlock>>;
}

/// Already loaded graph of source units. The collector never mutates it.
pub trait SourceGraph: Sync {
    type Unit: SourceUnit;

    /// Ids the walk starts from.
    fn roots(&self) -> Vec<String>;

    fn unit(&self, id: &str) -> Option<&Self::Unit>;
}

/// Every unit reachable from the roots, each exactly once.
///
/// The walk is breadth-first; the order is incidental and must not matter downstream.
pub fn reachable_units<G: SourceGraph>(graph: &G) -> Result<Vec<&G::Unit>, PipelineError> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<&G::Unit> = VecDeque::new();

    for root in graph.roots() {
        let unit = graph
            .unit(&root)
            .ok_or_else(|| PipelineError::UnknownRoot(root.clone()))?;
        if visited.insert(root) {
            queue.push_back(unit);
        }
    }

    let mut units = Vec::new();
    while let Some(unit) = queue.pop_front() {
        for import in unit.imports() {
            if visited.contains(import) {
                continue;
            }
            match graph.unit(import) {
                Some(next) => {
                    visited.insert(import.clone());
                    queue.push_back(next);
                }
                None => debug!("skipping import '{}' of '{}': not in graph", import, unit.id()),
            }
        }
        units.push(unit);
    }

    Ok(units)
}
