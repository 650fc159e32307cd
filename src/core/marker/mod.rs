//! Marker grammar and parsing.
//!
//! ## Module Structure
//!
//! - `grammar`: Argument keys and the immutable marker schema
//! - `parser`: Line parser producing typed rules or a marker error
//! - `family`: `MarkerFamily` strategy trait and the `+rbac:` implementation

pub mod family;
pub mod grammar;
pub mod parser;

pub use family::{MarkerFamily, RbacMarkers};
pub use grammar::{ArgumentKey, DEFAULT_PREFIX, MarkerSchema};
pub use parser::parse_marker;
