//! Generic record cleanups in `data/`.

use super::{load_optional, save};
use crate::error::Result;
use crate::xml::{Element, Node};
use std::path::Path;

/// Fix `on_delete` and `compute` fields in `data/ir_model_fields.xml`.
///
/// `on_delete` only means something for relational field types; the
/// export emits `eval="False"` for everything else, which the loader
/// rejects. Compute expressions are Python source and go into CDATA.
pub fn fix_on_delete_fields(module_dir: &Path) -> Result<()> {
    let path = module_dir.join("data").join("ir_model_fields.xml");
    let Some(mut doc) = load_optional(&path)? else {
        return Ok(());
    };

    doc.for_each_record_mut(|record| {
        let Some(ttype) = record.field_text("ttype") else {
            return;
        };
        let ttype = ttype.trim().to_string();

        if ttype != "many2one" && ttype != "one2many" {
            record.remove_children_where(|field| {
                field.name == "field"
                    && field.attr("name") == Some("on_delete")
                    && field.attr("eval") == Some("False")
            });
        }

        if let Some(compute) = record.field_mut("compute") {
            if let Some(text) = compute.text() {
                compute.set_text_cdata(text);
            }
        }
    });

    save(&path, &doc)
}

/// Remove records whose id is namespaced (contains a `.`) from a data
/// file; those were not created by the user and belong to other modules.
pub fn remove_external_records(module_dir: &Path, file_name: &str) -> Result<()> {
    let path = module_dir.join("data").join(file_name);
    let Some(mut doc) = load_optional(&path)? else {
        return Ok(());
    };

    remove_records_where(&mut doc.root, &|record| {
        record.attr("id").is_some_and(|id| id.contains('.'))
    });

    save(&path, &doc)
}

/// Find the id of the `Default` pricelist record in the source export.
pub fn find_default_pricelist_id(export_dir: &Path) -> Result<Option<String>> {
    let path = export_dir.join("data").join("product_pricelist.xml");
    let Some(doc) = load_optional(&path)? else {
        return Ok(None);
    };

    Ok(doc.records().iter().find_map(|record| {
        let name = record.field_text("name")?;
        (name == "Default" || name == "default")
            .then(|| record.attr("id").map(str::to_string))
            .flatten()
    }))
}

/// Remove the `Default` pricelist record from the destination file.
pub fn remove_default_pricelist(module_dir: &Path) -> Result<()> {
    let path = module_dir.join("data").join("product_pricelist.xml");
    let Some(mut doc) = load_optional(&path)? else {
        return Ok(());
    };

    remove_records_where(&mut doc.root, &|record| {
        record
            .field_text("name")
            .is_some_and(|name| name == "Default" || name == "default")
    });

    save(&path, &doc)
}

/// Remove matching `<record>` elements wherever they sit under `parent`.
fn remove_records_where(parent: &mut Element, pred: &dyn Fn(&Element) -> bool) {
    parent.children.retain(|child| match child {
        Node::Element(e) if e.name == "record" => !pred(e),
        _ => true,
    });
    for child in parent.child_elements_mut() {
        remove_records_where(child, pred);
    }
}

/// Delete data files that ended up with no records after the cleanups.
///
/// Returns the manifest `data` entries for the deleted files.
pub fn prune_empty_data_files(module_dir: &Path) -> Result<Vec<String>> {
    let mut pruned = Vec::new();
    for file_name in crate::constants::PRUNE_WHEN_EMPTY_FILES {
        let path = module_dir.join("data").join(file_name);
        let Some(doc) = load_optional(&path)? else {
            continue;
        };
        if doc.records().is_empty() {
            std::fs::remove_file(&path).map_err(|e| crate::error::Error::FileWrite {
                path: path.clone(),
                source: e,
            })?;
            pruned.push(format!("data/{file_name}"));
        }
    }
    Ok(pruned)
}
