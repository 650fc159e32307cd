//! Ready-made source graph implementations.
//!
//! - `memory`: Units assembled in memory (tests, embedding hosts)
//! - `directory`: One unit per source file on disk
//! - `comments`: Comment block extraction used by `directory`

pub mod comments;
pub mod directory;
pub mod memory;

pub use directory::{DirectoryGraph, FileUnit};
pub use memory::{InMemoryGraph, InMemoryUnit};
