use std::collections::BTreeMap;

use crate::core::collect::{SourceGraph, SourceUnit};
use crate::core::extract::CommentBlock;

/// A source unit held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnit {
    id: String,
    imports: Vec<String>,
    blocks: Vec<CommentBlock>,
}

impl InMemoryUnit {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_import(mut self, id: impl Into<String>) -> Self {
        self.imports.push(id.into());
        self
    }

    /// Attach a comment block starting at `line`:`column`.
    pub fn with_comment(mut self, text: impl Into<String>, line: usize, column: usize) -> Self {
        self.blocks.push(CommentBlock::new(text, line, column));
        self
    }
}

impl SourceUnit for InMemoryUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn imports(&self) -> &[String] {
        &self.imports
    }

    fn comment_blocks(&self) -> anyhow::Result<Vec<CommentBlock>> {
        Ok(self.blocks.clone())
    }
}

/// Graph of in-memory units.
///
/// Without explicit roots every unit is a root.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    units: BTreeMap<String, InMemoryUnit>,
    roots: Option<Vec<String>>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, unit: InMemoryUnit) -> Self {
        self.add_unit(unit);
        self
    }

    /// Add a unit, replacing any unit with the same id.
    pub fn add_unit(&mut self, unit: InMemoryUnit) {
        self.units.insert(unit.id.clone(), unit);
    }

    pub fn with_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roots = Some(roots.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl SourceGraph for InMemoryGraph {
    type Unit = InMemoryUnit;

    fn roots(&self) -> Vec<String> {
        match &self.roots {
            Some(roots) => roots.clone(),
            None => self.units.keys().cloned().collect(),
        }
    }

    fn unit(&self, id: &str) -> Option<&InMemoryUnit> {
        self.units.get(id)
    }
}
