//! Core data types shared by every pipeline stage.
//!
//! ## Module Structure
//!
//! - `source`: Source position types (SourceLocation)

pub mod source;

pub use source::SourceLocation;
