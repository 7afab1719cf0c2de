//! Mandatory scaffold files.

use crate::constants::{scaffold_paths, templates};
use crate::error::{Error, Result};
use std::path::Path;

/// Render a scaffold template for the given module.
fn render(template: &str, module_name: &str, module_title: &str) -> String {
    template
        .replace("{module}", module_name)
        .replace("{title}", module_title)
}

/// Write the onboarding files every industry module ships with.
pub fn write_mandatory_files(
    module_dir: &Path,
    module_name: &str,
    module_title: &str,
) -> Result<()> {
    let files = [
        (scaffold_paths::TOUR_JS, templates::TOUR_JS),
        (scaffold_paths::MAIL_MESSAGE, templates::MAIL_MESSAGE_XML),
        (
            scaffold_paths::KNOWLEDGE_FAVORITE,
            templates::KNOWLEDGE_FAVORITE_XML,
        ),
        (scaffold_paths::KNOWLEDGE_TOUR, templates::KNOWLEDGE_TOUR_XML),
    ];

    for (rel_path, template) in files {
        let path = module_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::FileWrite {
                path: path.clone(),
                source: e,
            })?;
        }
        let content = render(template, module_name, module_title);
        std::fs::write(&path, content).map_err(|e| Error::FileWrite { path, source: e })?;
    }
    Ok(())
}
