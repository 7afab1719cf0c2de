//! Website theme scaffolding.
//!
//! SCSS customizations exported as attachments are replayed through
//! `web_editor.assets.make_scss_customization` function calls, and the
//! export's website theme gets an immediate-install call, both collected
//! in `demo/website_theme_apply.xml`.

use crate::constants::scaffold_paths::THEME_APPLY;
use crate::error::{Error, Result};
use crate::xml::Document;
use regex::Regex;
use std::path::Path;

/// One SCSS customization block extracted from an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScssCustomization {
    /// Asset URL the customization applies to.
    pub url: String,
    /// Inner content of the `o-map-omit((…))` block.
    pub content: String,
}

/// Extract the customization block from an SCSS attachment, if present.
pub fn extract_scss(file_name: &str, content: &str) -> Option<ScssCustomization> {
    #[allow(clippy::unwrap_used)] // fixed pattern
    let block = Regex::new(r"(?s)o-map-omit\(\(\s*(.*?)\s*\)\)").unwrap();
    let caps = block.captures(content)?;

    let url = if file_name.contains("color") {
        format!("/website/static/src/scss/options/colors/{file_name}")
    } else {
        format!("/website/static/src/scss/options/{file_name}")
    };
    Some(ScssCustomization {
        url,
        content: caps[1].to_string(),
    })
}

/// Append `make_scss_customization` calls to the theme apply file.
pub fn write_scss_functions(
    module_dir: &Path,
    customizations: &[ScssCustomization],
) -> Result<()> {
    if customizations.is_empty() {
        return Ok(());
    }

    let mut functions = String::new();
    for item in customizations {
        functions.push_str(&format!(
            "    <function model=\"web_editor.assets\" name=\"make_scss_customization\">\n        <value>{}</value>\n        <value eval=\"{{{}}}\"/>\n    </function>\n",
            item.url,
            escape_attr(&item.content)
        ));
    }

    let path = module_dir.join(THEME_APPLY);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e,
        })?;
    }

    let content = if path.exists() {
        let existing = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })?;
        if existing.contains("</odoo>") {
            existing.replace("</odoo>", &format!("{functions}</odoo>"))
        } else {
            format!("{existing}\n{functions}</odoo>\n")
        }
    } else {
        format!("<?xml version='1.0' encoding='UTF-8'?>\n<odoo>\n{functions}</odoo>\n")
    };

    std::fs::write(&path, content).map_err(|e| Error::FileWrite { path, source: e })
}

/// Prepend an immediate-install call for the export's website theme.
///
/// The theme reference is read from `demo/website.xml`; nothing happens
/// when the export has no website or no theme.
pub fn add_theme_install(module_dir: &Path) -> Result<()> {
    let website_path = module_dir.join("demo").join("website.xml");
    if !website_path.exists() {
        return Ok(());
    }

    let content = std::fs::read_to_string(&website_path).map_err(|e| Error::FileRead {
        path: website_path.clone(),
        source: e,
    })?;
    let doc = Document::parse(&content).map_err(|e| Error::XmlParse {
        path: website_path.clone(),
        source: e,
    })?;

    let theme_ref = doc
        .root
        .descendants("field")
        .iter()
        .find(|f| f.attr("name") == Some("theme_id"))
        .and_then(|f| f.attr("ref"))
        .map(str::to_string);
    let Some(theme_ref) = theme_ref else {
        return Ok(());
    };

    let function = format!(
        "<function name=\"button_immediate_install\" model=\"ir.module.module\" eval=\"[ref('{theme_ref}', raise_if_not_found=False)]\"/>"
    );

    let path = module_dir.join(THEME_APPLY);
    let content = if path.exists() {
        let existing = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })?;
        existing.replace("<odoo>", &format!("<odoo>\n    {function}"))
    } else {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::FileWrite {
                path: path.clone(),
                source: e,
            })?;
        }
        format!("<?xml version='1.0' encoding='UTF-8'?>\n<odoo>\n    {function}\n</odoo>\n")
    };

    std::fs::write(&path, content).map_err(|e| Error::FileWrite { path, source: e })
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}
