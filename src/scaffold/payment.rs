//! Demo payment provider scaffolding.

use crate::constants::{scaffold_paths, templates};
use crate::error::{Error, Result};
use std::path::Path;

/// Write `demo/payment_provider_demo.xml`.
///
/// Only called when the source database has `website_sale` installed; the
/// caller appends the file to the manifest demo list.
pub fn write_demo_payment_provider(module_dir: &Path) -> Result<()> {
    let path = module_dir.join(scaffold_paths::PAYMENT_PROVIDER);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e,
        })?;
    }
    std::fs::write(&path, templates::PAYMENT_PROVIDER_XML)
        .map_err(|e| Error::FileWrite { path, source: e })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::xml::Document;

    #[test]
    fn test_payment_provider_file_is_valid_xml() {
        let tmp = tempfile::tempdir().unwrap();
        write_demo_payment_provider(tmp.path()).unwrap();

        let content =
            std::fs::read_to_string(tmp.path().join("demo/payment_provider_demo.xml")).unwrap();
        let doc = Document::parse(&content).unwrap();
        assert_eq!(doc.root.attr("noupdate"), Some("1"));
        assert!(content.contains("base.module_payment_demo"));
    }
}
