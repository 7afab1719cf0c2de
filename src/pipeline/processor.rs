//! Single XML file processing.

use crate::error::{Error, Result};
use crate::pipeline::DemoOrder;
use crate::rules::{
    ComputedFieldScrubber, FieldsSource, IdentifierRules, apply_id_map, model_unwanted_fields,
    process_sequence_fields, remove_fields, remove_ref_fields,
};
use crate::xml::Document;
use std::collections::BTreeMap;
use std::path::Path;

/// Shared inputs for the per-file transform chain.
pub struct ProcessContext<'a, S> {
    /// Compiled identifier rename rules.
    pub rules: &'a IdentifierRules,
    /// Stable id replacements.
    pub id_map: &'a BTreeMap<String, String>,
    /// Id of the source Default pricelist, when one exists.
    pub default_pricelist_id: Option<&'a str>,
    /// Globally unwanted field names.
    pub unwanted_fields: &'a [String],
    /// Computed-field scrubber, absent in offline runs.
    pub scrubber: Option<&'a mut ComputedFieldScrubber<S>>,
}

/// Run one XML data file through the transform chain.
///
/// `in_demo_dir` controls demo ordering metadata collection; `path` is
/// the source file, used for error reporting.
pub fn process_xml_file<S: FieldsSource>(
    path: &Path,
    content: &str,
    in_demo_dir: bool,
    ctx: &mut ProcessContext<'_, S>,
    demo: &mut DemoOrder,
) -> Result<String> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut content = apply_id_map(content, ctx.id_map);

    if let Some(pricelist_id) = ctx.default_pricelist_id {
        content = remove_ref_fields(&content, pricelist_id);
    }

    content = ctx.rules.apply(&content);
    content = remove_fields(&content, ctx.unwanted_fields);
    content = process_sequence_fields(&content).map_err(|e| Error::XmlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    // The tree is parsed once here; the removals below keep working on
    // the string so the records seen reflect the file as exported.
    let doc = Document::parse(&content).map_err(|e| Error::XmlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut local_refs: Vec<String> = Vec::new();
    for record in doc.records() {
        for field in record.child_elements() {
            if let Some(ref_id) = field.attr("ref") {
                if !ref_id.contains('.') && !local_refs.iter().any(|r| r == ref_id) {
                    local_refs.push(ref_id.to_string());
                }
            }
        }
    }

    let records = doc.records();
    if in_demo_dir && records.is_empty() {
        demo.add_recordless_file(&file_name, local_refs.clone());
    }

    for record in records {
        if in_demo_dir {
            if let Some(record_id) = record.attr("id") {
                demo.insert_for_record(&file_name, &local_refs, record_id);
            }
        }

        let Some(model) = record.attr("model") else {
            continue;
        };

        if let Some(unwanted) = model_unwanted_fields(model) {
            content = remove_fields(&content, unwanted);
        }

        if let Some(scrubber) = ctx.scrubber.as_deref_mut() {
            content = scrubber.scrub(model, record, &content)?;
        }
    }

    if file_name == "ir_default.xml" {
        content = content.replacen("<odoo>", "<odoo noupdate=\"1\">", 1);
    }

    Ok(content)
}
