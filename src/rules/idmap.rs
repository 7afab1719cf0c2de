//! Stable record id derivation.
//!
//! Studio exports name many records with random hexadecimal ids. For the
//! technical files the id can be derived from what the record describes
//! (model, field, view type, …), which keeps diffs between module versions
//! readable. The map is built from the source tree before the mirror pass
//! and applied to every XML file.

use crate::constants::ID_MAP_FILES;
use crate::error::{Error, Result};
use crate::xml::{Document, Element};
use std::collections::BTreeMap;
use std::path::Path;

/// Build the old-id to new-id map from the export's `data/` directory.
pub fn build_id_map(data_dir: &Path) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();

    for file_name in ID_MAP_FILES {
        let path = data_dir.join(file_name);
        if !path.exists() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })?;
        let doc = Document::parse(&content).map_err(|e| Error::XmlParse {
            path: path.clone(),
            source: e,
        })?;

        for record in doc.records() {
            let Some(new_id) = derive_id(file_name, record, &map) else {
                continue;
            };
            let Some(old_id) = record.attr("id") else {
                continue;
            };
            if old_id != new_id && !old_id.contains('.') {
                map.insert(old_id.to_string(), new_id);
            }
        }
    }

    Ok(map)
}

/// Derive the stable id for one record, or `None` when the record keeps
/// its original id.
fn derive_id(
    file_name: &str,
    record: &Element,
    map: &BTreeMap<String, String>,
) -> Option<String> {
    match file_name {
        "ir_model.xml" => {
            let model = underscored(&record.field_text("model")?);
            Some(format!("{model}_model"))
        }
        "ir_model_fields.xml" => {
            let model_id = field_ref(record, "model_id")?;
            let name = underscored(&record.field_text("name")?);
            let model_id = resolve(map, &model_id);
            Some(format!("{model_id}_{name}_field"))
        }
        "ir_ui_view.xml" => {
            // Inherited views keep their ids; qweb views are website pages
            // with meaningful names already.
            if record.field("inherit_id").is_some() {
                return None;
            }
            let model = underscored(&record.field_text("model")?);
            let view_type = record.field_text("type")?;
            if view_type == "qweb" {
                return None;
            }
            Some(format!("{model}_{}_view", underscored(&view_type)))
        }
        "ir_default.xml" => {
            let field_id = field_ref(record, "field_id")?;
            let field_id = resolve(map, &field_id);
            Some(format!("{field_id}_default_value"))
        }
        "ir_model_access.xml" => {
            let model_id = field_ref(record, "model_id")?;
            let group_id = field_ref(record, "group_id")?;
            let model_id = resolve(map, &model_id);
            Some(format!("{model_id}_{group_id}_model_access"))
        }
        _ => None,
    }
}

/// Apply the id map to file content by rewriting the quoted attribute
/// forms the ids appear in.
pub fn apply_id_map(content: &str, map: &BTreeMap<String, String>) -> String {
    let mut content = content.to_string();
    for (old_id, new_id) in map {
        content = content.replace(
            &format!("model_id=\"{old_id}\""),
            &format!("model_id=\"{new_id}\""),
        );
        content = content.replace(&format!("ref=\"{old_id}\""), &format!("ref=\"{new_id}\""));
        content = content.replace(&format!("id=\"{old_id}\""), &format!("id=\"{new_id}\""));
    }
    content
}

fn underscored(value: &str) -> String {
    value.replace('.', "_")
}

fn field_ref(record: &Element, name: &str) -> Option<String> {
    record
        .field(name)
        .and_then(|f| f.attr("ref"))
        .map(underscored)
}

fn resolve(map: &BTreeMap<String, String>, id: &str) -> String {
    map.get(id).cloned().unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_build_id_map_chains_model_into_fields() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "ir_model.xml",
            r#"<odoo>
  <record id="ir_model_5f3a" model="ir.model">
    <field name="model">x_pet.species</field>
  </record>
</odoo>"#,
        );
        write(
            tmp.path(),
            "ir_model_fields.xml",
            r#"<odoo>
  <record id="ir_model_fields_9c2d" model="ir.model.fields">
    <field name="model_id" ref="ir_model_5f3a"/>
    <field name="name">x_habitat</field>
  </record>
</odoo>"#,
        );

        let map = build_id_map(tmp.path()).unwrap();
        assert_eq!(map.get("ir_model_5f3a").unwrap(), "x_pet_species_model");
        assert_eq!(
            map.get("ir_model_fields_9c2d").unwrap(),
            "x_pet_species_model_x_habitat_field"
        );
    }

    #[test]
    fn test_views_skip_inherited_and_qweb() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "ir_ui_view.xml",
            r#"<odoo>
  <record id="ir_ui_view_aa11" model="ir.ui.view">
    <field name="model">x_pet.species</field>
    <field name="type">form</field>
  </record>
  <record id="ir_ui_view_bb22" model="ir.ui.view">
    <field name="model">x_pet.species</field>
    <field name="type">form</field>
    <field name="inherit_id" ref="base.view_partner_form"/>
  </record>
  <record id="ir_ui_view_cc33" model="ir.ui.view">
    <field name="model">website.page</field>
    <field name="type">qweb</field>
  </record>
</odoo>"#,
        );

        let map = build_id_map(tmp.path()).unwrap();
        assert_eq!(map.get("ir_ui_view_aa11").unwrap(), "x_pet_species_form_view");
        assert!(!map.contains_key("ir_ui_view_bb22"));
        assert!(!map.contains_key("ir_ui_view_cc33"));
    }

    #[test]
    fn test_namespaced_ids_never_remapped() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "ir_model.xml",
            r#"<odoo>
  <record id="base.model_res_partner" model="ir.model">
    <field name="model">res.partner</field>
  </record>
</odoo>"#,
        );

        let map = build_id_map(tmp.path()).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_apply_id_map_rewrites_attribute_forms() {
        let mut map = BTreeMap::new();
        map.insert("old_1".to_string(), "x_pet_species_model".to_string());

        let content = r#"<record id="old_1"><field name="model_id" model_id="old_1" ref="old_1"/></record>"#;
        let out = apply_id_map(content, &map);
        assert_eq!(
            out,
            r#"<record id="x_pet_species_model"><field name="model_id" model_id="x_pet_species_model" ref="x_pet_species_model"/></record>"#
        );
    }
}
