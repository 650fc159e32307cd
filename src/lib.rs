//! rbacgen - RBAC policy generation from source markers
//!
//! Scans comment text attached to source units for `+rbac:` markers, merges the
//! permissions they declare across the whole unit graph, and emits a canonical,
//! deterministic policy document.
//!
//! ```text
//! // +rbac:groups=apps,resources=deployments,verbs=get;list;watch
//! // +rbac:urls=/healthz,verbs=get
//! ```
//!
//! ## Module Structure
//!
//! - `config`: Configuration file loading and validation
//! - `core`: Marker parsing, collection, aggregation and emission
//! - `host`: Source graph implementations (in-memory, filesystem)
//! - `issues`: Marker and pipeline error types

pub mod config;
pub mod core;
pub mod host;
pub mod issues;

pub use crate::config::Config;
pub use crate::core::{
    CancelSignal, ClusterRole, Document, GenerationOutput, generate, generate_role,
};
pub use crate::issues::{MarkerError, MarkerErrorKind, PipelineError};
