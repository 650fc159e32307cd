//! Core generation engine.
//!
//! ## Pipeline
//!
//! 1. **Collect**: walk the host's source graph and extract raw marker lines per unit
//!    (parallel, order-insensitive).
//! 2. **Parse**: turn each marker line into a typed [`Rule`] or a positioned error.
//! 3. **Aggregate**: merge mergeable rules into a fully reduced [`RuleSet`].
//! 4. **Emit**: sort the rule set into the canonical [`Document`].
//!
//! ## Module Structure
//!
//! - `marker`: Marker grammar, parser and marker families
//! - `extract`: Marker line extraction from comment blocks
//! - `collect`: Host graph traits, cancellation and the parallel collector
//! - `rules`: Rule types, merging and the reduced rule set
//! - `emit`: Canonical ordering and the wire-format document
//! - `pipeline`: `generate` entry points
//! - `data`: Shared position types

pub mod collect;
pub mod data;
pub mod emit;
pub mod extract;
pub mod marker;
pub mod pipeline;
pub mod rules;

pub use collect::{CancelSignal, SourceGraph, SourceUnit};
pub use data::SourceLocation;
pub use emit::{ClusterRole, Document, PolicyRecord, emit};
pub use extract::{CommentBlock, MarkerOccurrence, extract_occurrences};
pub use marker::{ArgumentKey, MarkerFamily, MarkerSchema, RbacMarkers, parse_marker};
pub use pipeline::{GenerationOutput, generate, generate_role, generate_with};
pub use rules::{ResourceRule, Rule, RuleKey, RuleSet, UrlRule, aggregate};
