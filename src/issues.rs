//! Error types for marker parsing and the generation pipeline.
//!
//! Two tiers of failure exist:
//! - [`MarkerError`]: a local, recoverable problem with one marker line. It is attached to
//!   the occurrence's position and collected alongside whatever rules did parse.
//! - [`PipelineError`]: a collaborator-level failure (unreadable unit, cancellation) that
//!   prevents any document from being produced.

use std::fmt;

use thiserror::Error;

use crate::core::ArgumentKey;
use crate::core::data::SourceLocation;

// ============================================================
// Marker errors (recoverable)
// ============================================================

/// What went wrong while parsing a single marker line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum MarkerErrorKind {
    /// An argument key outside the recognized set.
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
    /// A key required by the rule's shape is absent.
    #[error("missing required argument '{0}'")]
    MissingArgument(ArgumentKey),
    /// `urls` appears together with resource-rule arguments.
    #[error("a marker cannot declare both resource arguments and 'urls'")]
    ConflictingRuleShape,
    /// A list contains an empty element (`groups=`, `verbs=get;;list`).
    #[error("empty list element in argument '{0}'")]
    EmptyListElement(ArgumentKey),
    /// The text starts with the prefix but does not follow the marker grammar.
    #[error("malformed marker: {0}")]
    MalformedMarkerPrefix(String),
}

impl MarkerErrorKind {
    /// Short stable identifier, used for sorting and machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            MarkerErrorKind::UnknownArgument(_) => "unknown-argument",
            MarkerErrorKind::MissingArgument(_) => "missing-argument",
            MarkerErrorKind::ConflictingRuleShape => "conflicting-rule-shape",
            MarkerErrorKind::EmptyListElement(_) => "empty-list-element",
            MarkerErrorKind::MalformedMarkerPrefix(_) => "malformed-marker",
        }
    }
}

/// A positioned marker parse error.
///
/// Carries everything a host needs to report the problem: where it was found, what kind
/// of error it is, and the offending marker text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerError {
    pub location: SourceLocation,
    pub kind: MarkerErrorKind,
    /// The trimmed marker line as it appeared in the comment.
    pub text: String,
}

impl MarkerError {
    pub fn new(location: SourceLocation, kind: MarkerErrorKind, text: impl Into<String>) -> Self {
        Self {
            location,
            kind,
            text: text.into(),
        }
    }

    // Convenience accessors
    pub fn unit(&self) -> &str {
        &self.location.unit
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }

    /// Total order used to normalize error lists: position first, then kind, then text.
    pub(crate) fn sort_key(&self) -> (&SourceLocation, &'static str, String, &str) {
        (
            &self.location,
            self.kind.code(),
            self.kind.to_string(),
            &self.text,
        )
    }
}

impl fmt::Display for MarkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.location, self.kind, self.text)
    }
}

impl std::error::Error for MarkerError {}

// ============================================================
// Pipeline errors (fatal)
// ============================================================

/// Failures that stop the pipeline before a document can be produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The host could not supply comment data for a unit.
    #[error("unable to read comments of unit '{unit}'")]
    UnreadableUnit {
        unit: String,
        #[source]
        source: anyhow::Error,
    },
    /// A root id handed to the collector does not exist in the graph.
    #[error("root unit '{0}' is not part of the source graph")]
    UnknownRoot(String),
    /// The caller cancelled the run.
    #[error("generation was cancelled")]
    Cancelled,
    /// The caller's deadline passed while units were still being visited.
    #[error("generation deadline exceeded")]
    DeadlineExceeded,
}
