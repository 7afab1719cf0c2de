//! Restore-map generation for removed cycle fields.

use super::breaker::RemovedField;
use super::chains::ChainKind;
use crate::constants::circular::MAP_FILE;
use crate::error::{Error, Result};
use std::path::Path;

/// Write the `map_circular_dependencies.xml` files for the removals.
///
/// Returns `(data_written, demo_written)` so the manifest can list the
/// files that actually exist.
pub fn write_map_files(module_dir: &Path, removed: &[RemovedField]) -> Result<(bool, bool)> {
    let data = render_records(removed, ChainKind::Data);
    let demo = render_records(removed, ChainKind::Demo);

    if !data.is_empty() {
        write_map_file(&module_dir.join("data").join(MAP_FILE), &data)?;
    }
    if !demo.is_empty() {
        write_map_file(&module_dir.join("demo").join(MAP_FILE), &demo)?;
    }
    Ok((!data.is_empty(), !demo.is_empty()))
}

fn render_records(removed: &[RemovedField], kind: ChainKind) -> String {
    let mut out = String::new();
    for entry in removed.iter().filter(|e| e.kind == kind) {
        let field = if let Some(eval) = &entry.eval_attr {
            format!(
                r#"<field name="{}" eval="{}"/>"#,
                entry.field_name,
                escape_attr(eval)
            )
        } else if let Some(ref_id) = &entry.ref_attr {
            format!(r#"<field name="{}" ref="{}"/>"#, entry.field_name, ref_id)
        } else {
            format!(r#"<field name="{}"/>"#, entry.field_name)
        };
        out.push_str(&format!(
            "    <record id=\"{}\" model=\"{}\">\n        {}\n    </record>\n",
            entry.record_id, entry.model, field
        ));
    }
    out
}

fn write_map_file(path: &Path, records: &str) -> Result<()> {
    let content = format!("<?xml version='1.0' encoding='UTF-8'?>\n<odoo>\n{records}</odoo>\n");
    std::fs::write(path, content).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}
