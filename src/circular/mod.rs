//! Circular data-loading dependency resolution.
//!
//! The export tool writes a `warnings.txt` listing record chains that
//! reference each other across data files. The fields closing each cycle
//! are removed from the original files and collected into a
//! `map_circular_dependencies.xml` that restores them once everything
//! else is loaded.

mod breaker;
mod chains;
mod mapfile;

pub use breaker::{RemovedField, break_chains};
pub use chains::{ChainKind, DependencyChain, parse_warnings};
pub use mapfile::write_map_files;
