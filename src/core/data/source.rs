use std::fmt;

/// Position of a marker inside a source unit.
///
/// `line` and `column` are 1-based. Ordering is by unit, then line, then column, which is
/// the order errors are reported in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    /// Stable identifier of the owning source unit (e.g. a package path).
    pub unit: String,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(unit: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            unit: unit.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.unit, self.line, self.column)
    }
}
