//! Minimal XML document model for Odoo data files.
//!
//! Odoo record files are small and regular: an `<odoo>` root, `<record>`
//! elements, `<field>` children. The rewrite passes need to remove and
//! reorder elements and wrap text in CDATA, so the event stream from
//! `quick-xml` is materialized into a tiny element tree and serialized
//! back with the conventional two-space indentation.

mod tree;

pub use tree::{Document, Element, Node};
