//! Website attachment cleanup in `demo/ir_attachment_post.xml`.

use super::{load_optional, save};
use crate::error::{Error, Result};
use crate::xml::{Element, Node};
use regex::Regex;
use std::path::Path;
use tracing::warn;

/// Remove attachments no website view references.
///
/// The export dumps every attachment of the database; only the ones whose
/// `key` or `name` occurs in `demo/ir_ui_view.xml` are kept. Unreferenced
/// attachments are dropped together with their exported payload files.
/// Instance-specific fields (`res_model`, `website_id`, `url`) are
/// stripped from the surviving records.
pub fn remove_unused_attachments(module_dir: &Path, destination_base: &Path) -> Result<()> {
    let attachments_path = module_dir.join("demo").join("ir_attachment_post.xml");
    let views_path = module_dir.join("demo").join("ir_ui_view.xml");
    if !views_path.exists() {
        return Ok(());
    }
    let Some(mut doc) = load_optional(&attachments_path)? else {
        return Ok(());
    };

    let view_content = std::fs::read_to_string(&views_path).map_err(|e| Error::FileRead {
        path: views_path.clone(),
        source: e,
    })?;

    let mut unused_files = Vec::new();
    filter_records(&mut doc.root, &view_content, &mut unused_files);

    for file in unused_files {
        let rel = file.trim_start_matches('/');
        let path = destination_base.join(rel);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to remove unused attachment file {}: {e}", path.display());
            }
        }
    }

    save(&attachments_path, &doc)
}

fn filter_records(parent: &mut Element, view_content: &str, unused_files: &mut Vec<String>) {
    parent.children.retain_mut(|child| {
        let Node::Element(record) = child else {
            return true;
        };
        if record.name != "record" {
            return true;
        }

        record.remove_children_where(|field| {
            field.name == "field"
                && matches!(field.attr("name"), Some("res_model" | "website_id" | "url"))
        });

        let key = record.field_text("key");
        let name = record.field_text("name");
        let data_file = record
            .field("datas")
            .and_then(|f| f.attr("file"))
            .map(str::to_string);

        if key.is_none() && name.is_none() {
            return false;
        }

        let referenced = key.as_deref().is_some_and(|k| view_content.contains(k))
            || name.as_deref().is_some_and(|n| view_content.contains(n));
        if !referenced {
            if let Some(file) = data_file {
                unused_files.push(file);
            }
            return false;
        }
        true
    });

    for child in parent.child_elements_mut() {
        if child.name != "record" {
            filter_records(child, view_content, unused_files);
        }
    }
}

/// Sort `ir_attachment_<n>` records numerically and move them to the
/// front of the file.
pub fn order_attachments(module_dir: &Path) -> Result<()> {
    let path = module_dir.join("demo").join("ir_attachment_post.xml");
    let Some(mut doc) = load_optional(&path)? else {
        return Ok(());
    };

    #[allow(clippy::unwrap_used)] // fixed pattern
    let numbered = Regex::new(r"^ir_attachment_(\d+)$").unwrap();

    let mut extracted: Vec<(u64, Element)> = Vec::new();
    let mut kept = Vec::with_capacity(doc.root.children.len());
    for child in doc.root.children.drain(..) {
        match child {
            Node::Element(e) if e.name == "record" => {
                let number = e
                    .attr("id")
                    .and_then(|id| numbered.captures(id))
                    .and_then(|caps| caps[1].parse::<u64>().ok());
                if let Some(number) = number {
                    extracted.push((number, e));
                } else {
                    kept.push(Node::Element(e));
                }
            }
            other => kept.push(other),
        }
    }
    extracted.sort_by_key(|(number, _)| *number);

    doc.root.children = extracted
        .into_iter()
        .map(|(_, e)| Node::Element(e))
        .chain(kept)
        .collect();

    save(&path, &doc)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::xml::Document;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn setup_module(base: &Path) -> std::path::PathBuf {
        let module_dir = base.join("pet_shop");
        write(
            &module_dir,
            "demo/ir_ui_view.xml",
            r#"<odoo>
  <record id="homepage_view" model="ir.ui.view">
    <field name="arch">uses banner_image here</field>
  </record>
</odoo>"#,
        );
        write(
            &module_dir,
            "demo/ir_attachment_post.xml",
            r#"<odoo>
  <record id="ir_attachment_2" model="ir.attachment">
    <field name="name">banner_image</field>
    <field name="res_model">ir.ui.view</field>
    <field name="website_id" ref="website_1"/>
  </record>
  <record id="ir_attachment_10" model="ir.attachment">
    <field name="key">banner_image</field>
  </record>
  <record id="ir_attachment_1" model="ir.attachment">
    <field name="name">orphan_image</field>
    <field name="datas" file="/pet_shop/static/orphan.png"/>
  </record>
  <record id="attachment_nameless" model="ir.attachment">
    <field name="mimetype">image/png</field>
  </record>
</odoo>"#,
        );
        write(base, "pet_shop/static/orphan.png", "png-bytes");
        module_dir
    }

    #[test]
    fn test_unused_attachments_removed_with_files() {
        let tmp = tempfile::tempdir().unwrap();
        let module_dir = setup_module(tmp.path());

        remove_unused_attachments(&module_dir, tmp.path()).unwrap();

        let content =
            std::fs::read_to_string(module_dir.join("demo/ir_attachment_post.xml")).unwrap();
        let doc = Document::parse(&content).unwrap();
        let ids: Vec<_> = doc
            .records()
            .iter()
            .filter_map(|r| r.attr("id"))
            .collect();
        assert_eq!(ids, vec!["ir_attachment_2", "ir_attachment_10"]);
        // Instance-specific fields are stripped from survivors.
        assert!(!content.contains("res_model"));
        assert!(!content.contains("website_id"));
        // The orphan's exported payload is gone from disk.
        assert!(!tmp.path().join("pet_shop/static/orphan.png").exists());
    }

    #[test]
    fn test_order_attachments_numeric_sort_to_front() {
        let tmp = tempfile::tempdir().unwrap();
        let module_dir = tmp.path().join("pet_shop");
        write(
            &module_dir,
            "demo/ir_attachment_post.xml",
            r#"<odoo>
  <record id="attachment_special" model="ir.attachment">
    <field name="name">special</field>
  </record>
  <record id="ir_attachment_10" model="ir.attachment"/>
  <record id="ir_attachment_2" model="ir.attachment"/>
</odoo>"#,
        );

        order_attachments(&module_dir).unwrap();

        let content =
            std::fs::read_to_string(module_dir.join("demo/ir_attachment_post.xml")).unwrap();
        let doc = Document::parse(&content).unwrap();
        let ids: Vec<_> = doc
            .records()
            .iter()
            .filter_map(|r| r.attr("id"))
            .collect();
        assert_eq!(
            ids,
            vec!["ir_attachment_2", "ir_attachment_10", "attachment_special"]
        );
    }

    #[test]
    fn test_missing_view_file_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let module_dir = tmp.path().join("pet_shop");
        write(&module_dir, "demo/ir_attachment_post.xml", "<odoo>\n</odoo>");
        remove_unused_attachments(&module_dir, tmp.path()).unwrap();
        order_attachments(&module_dir).unwrap();
    }
}
