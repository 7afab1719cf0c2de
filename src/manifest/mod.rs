//! Module manifest (`__manifest__.py`) handling.
//!
//! Studio exports ship their manifest as a Python dict literal. Only the
//! subset the platform actually emits is supported: string keys, string /
//! boolean / integer values, lists of strings, and one level of nested
//! dicts (the `assets` entry).

mod model;
mod parser;
mod rewrite;
mod writer;

pub use model::{Manifest, Value};
pub use parser::parse_manifest;
pub use rewrite::{RewriteOptions, finalize_manifest, rewrite_manifest};
pub use writer::write_manifest;
