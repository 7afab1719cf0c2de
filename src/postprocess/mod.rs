//! Record-level passes over the mirrored destination tree.
//!
//! These run after every file has been copied and rewritten, because they
//! need to see the destination files as a whole (cross-file reference
//! checks, record reordering, empty-file pruning).

mod attachments;
mod knowledge;
mod records;
mod sale;

pub use attachments::{order_attachments, remove_unused_attachments};
pub use knowledge::clean_knowledge_article;
pub use records::{
    find_default_pricelist_id, fix_on_delete_fields, prune_empty_data_files,
    remove_default_pricelist, remove_external_records,
};
pub use sale::clean_sale_order_lines;

use crate::error::{Error, Result};
use crate::xml::Document;
use std::path::Path;

/// Parse an XML file if it exists.
pub(crate) fn load_optional(path: &Path) -> Result<Option<Document>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Document::parse(&content)
        .map(Some)
        .map_err(|e| Error::XmlParse {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Serialize a document back to its file.
pub(crate) fn save(path: &Path, doc: &Document) -> Result<()> {
    std::fs::write(path, doc.to_xml()).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
