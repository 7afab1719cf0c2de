//! Field removal rules.
//!
//! Field elements are removed from the raw file content rather than the
//! element tree so untouched markup (attribute order, entity escapes,
//! embedded HTML) survives byte-for-byte.

use crate::constants::MODEL_FIELD_MAP;
use crate::xml::Document;
use regex::Regex;

/// Remove `<field name="…">` elements, both paired and self-closing forms.
pub fn remove_fields<S: AsRef<str>>(content: &str, names: &[S]) -> String {
    if names.is_empty() {
        return content.to_string();
    }

    let alternation = names
        .iter()
        .map(|n| regex::escape(n.as_ref()))
        .collect::<Vec<_>>()
        .join("|");

    let paired = compile(&format!(
        r#"(?s)\s*<field name="(?:{alternation})">.*?</field>"#
    ));
    let self_closing = compile(&format!(
        r#"\s*<field name="(?:{alternation})"[^>]*\s*/>"#
    ));

    let content = paired.replace_all(content, "");
    self_closing.replace_all(&content, "").into_owned()
}

/// Remove field elements that reference the given record id.
pub fn remove_ref_fields(content: &str, ref_id: &str) -> String {
    let id = regex::escape(ref_id);
    let self_closing = compile(&format!(r#"\s*<field[^>]*\sref="{id}"[^>]*/>"#));
    let paired = compile(&format!(r#"(?s)\s*<field[^>]*\sref="{id}"[^>]*>.*?</field>"#));

    let content = self_closing.replace_all(content, "");
    paired.replace_all(&content, "").into_owned()
}

/// Unwanted fields for a given model, if any.
pub fn model_unwanted_fields(model: &str) -> Option<&'static [&'static str]> {
    MODEL_FIELD_MAP
        .iter()
        .find(|(m, _)| *m == model)
        .map(|(_, fields)| *fields)
}

/// Remove `sequence` fields and mark the root for automatic sequencing.
///
/// When any removed sequence field carried a literal numeric value, the
/// root `<odoo>` element gets `auto_sequence="1"` so the server renumbers
/// the records on load. Files without records are left untouched.
pub fn process_sequence_fields(content: &str) -> Result<String, quick_xml::Error> {
    let doc = Document::parse(content)?;
    let records = doc.records();
    if records.is_empty() {
        return Ok(content.to_string());
    }

    let found_numeric = records.iter().any(|record| {
        record.descendants("field").iter().any(|field| {
            field.attr("name") == Some("sequence")
                && field.text().is_some_and(|t| {
                    let t = t.trim();
                    !t.is_empty() && t.chars().all(|c| c.is_ascii_digit())
                })
        })
    });

    let mut content = remove_fields(content, &["sequence"]);
    if found_numeric {
        content = content.replacen("<odoo", "<odoo auto_sequence=\"1\"", 1);
    }
    Ok(content)
}

#[allow(clippy::unwrap_used)] // patterns are fixed templates over escaped input
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_paired_and_self_closing() {
        let content = "<record>\n    <field name=\"color\">3</field>\n    <field name=\"uuid\" eval=\"False\"/>\n    <field name=\"name\">keep</field>\n</record>";
        let out = remove_fields(content, &["color", "uuid"]);
        assert_eq!(
            out,
            "<record>\n    <field name=\"name\">keep</field>\n</record>"
        );
    }

    #[test]
    fn test_remove_fields_keeps_similar_names() {
        let content = r#"<field name="color_secondary">5</field>"#;
        assert_eq!(remove_fields(content, &["color"]), content);
    }

    #[test]
    fn test_remove_multiline_field_body() {
        let content = "<field name=\"access_token\">line1\nline2</field><field name=\"x\">1</field>";
        let out = remove_fields(content, &["access_token"]);
        assert_eq!(out, "<field name=\"x\">1</field>");
    }

    #[test]
    fn test_remove_ref_fields() {
        let content = "<record>\n    <field name=\"pricelist_id\" ref=\"pricelist_7\"/>\n    <field name=\"name\">x</field>\n</record>";
        let out = remove_ref_fields(content, "pricelist_7");
        assert_eq!(out, "<record>\n    <field name=\"name\">x</field>\n</record>");
    }

    #[test]
    fn test_model_unwanted_fields_lookup() {
        assert!(model_unwanted_fields("pos.session")
            .unwrap()
            .contains(&"start_at"));
        assert!(model_unwanted_fields("no.such.model").is_none());
    }

    #[test]
    fn test_sequence_numeric_adds_auto_sequence() {
        let content = "<odoo>\n  <record id=\"a\" model=\"m\">\n    <field name=\"sequence\">10</field>\n    <field name=\"name\">x</field>\n  </record>\n</odoo>";
        let out = process_sequence_fields(content).unwrap();
        assert!(out.contains("<odoo auto_sequence=\"1\">"));
        assert!(!out.contains("sequence\">10"));
        assert!(out.contains("<field name=\"name\">x</field>"));
    }

    #[test]
    fn test_sequence_eval_false_not_numeric() {
        let content = "<odoo>\n  <record id=\"a\" model=\"m\">\n    <field name=\"sequence\" eval=\"False\"/>\n  </record>\n</odoo>";
        let out = process_sequence_fields(content).unwrap();
        assert!(!out.contains("auto_sequence"));
        assert!(!out.contains("<field name=\"sequence\""));
    }

    #[test]
    fn test_sequence_untouched_without_records() {
        let content = "<odoo>\n  <menuitem id=\"m\" sequence=\"1\"/>\n</odoo>";
        assert_eq!(process_sequence_fields(content).unwrap(), content);
    }
}
