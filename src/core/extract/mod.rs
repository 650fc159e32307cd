//! Annotation extraction: find marker lines inside a unit's comment blocks.
//!
//! This is a targeted scan, not a comment parser. Every physical line of every block is
//! trimmed and kept only if it starts with the marker prefix; ordinary documentation is
//! skipped. Extraction is a pure function of its inputs, which lets the collector run it
//! on many units at once.

use crate::core::data::SourceLocation;

/// One comment block as supplied by the host, with delimiters already stripped.
///
/// `line` and `column` are the 1-based position of the block's first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl CommentBlock {
    pub fn new(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            text: text.into(),
            line,
            column,
        }
    }
}

/// A raw marker line found in a unit, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerOccurrence {
    /// Trimmed marker text, starting with the prefix.
    pub text: String,
    pub location: SourceLocation,
}

/// Scan a unit's comment blocks for lines starting with `prefix`.
///
/// Occurrences are returned in block order, then physical line order.
pub fn extract_occurrences(
    unit: &str,
    blocks: &[CommentBlock],
    prefix: &str,
) -> Vec<MarkerOccurrence> {
    blocks
        .iter()
        .flat_map(|block| extract_from_block(unit, block, prefix))
        .collect()
}

fn extract_from_block<'a>(
    unit: &'a str,
    block: &'a CommentBlock,
    prefix: &'a str,
) -> impl Iterator<Item = MarkerOccurrence> + 'a {
    block
        .text
        .lines()
        .enumerate()
        .filter_map(move |(index, raw_line)| {
            let trimmed = raw_line.trim();
            if !trimmed.starts_with(prefix) {
                return None;
            }

            let indent = raw_line.chars().take_while(|c| c.is_whitespace()).count();
            let base_column = if index == 0 { block.column } else { 1 };

            Some(MarkerOccurrence {
                text: trimmed.to_string(),
                location: SourceLocation::new(unit, block.line + index, base_column + indent),
            })
        })
}
