//! Collection of marker occurrences over the host's source graph.
//!
//! ## Module Structure
//!
//! - `graph`: `SourceUnit` / `SourceGraph` host traits and the reachability walk
//! - `cancel`: External cancellation and deadline signal
//! - `collector`: Parallel extraction over every reachable unit

pub mod cancel;
pub mod collector;
pub mod graph;

pub use cancel::CancelSignal;
pub use collector::collect_occurrences;
pub use graph::{SourceGraph, SourceUnit, reachable_units};
