//! Cycle breaking across chain files.

use super::chains::{ChainKind, DependencyChain};
use crate::error::{Error, Result};
use crate::xml::Document;
use regex::Regex;
use std::path::Path;

/// A field removed to break a loading cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedField {
    /// Load list the field's file belongs to.
    pub kind: ChainKind,
    /// Id of the record the field was removed from.
    pub record_id: String,
    /// Model of that record.
    pub model: String,
    /// Name of the removed field.
    pub field_name: String,
    /// `ref` attribute of the removed field, if that was the cycle edge.
    pub ref_attr: Option<String>,
    /// `eval` attribute of the removed field, if that was the cycle edge.
    pub eval_attr: Option<String>,
}

/// Walk every chain's files in reverse, removing the fields that refer
/// back to records loaded later in the chain.
///
/// Each removal is recorded so [`super::write_map_files`] can restore the
/// field after the initial load.
pub fn break_chains(
    module_dir: &Path,
    chains: &[DependencyChain],
) -> Result<Vec<RemovedField>> {
    #[allow(clippy::unwrap_used)] // fixed pattern
    let eval_ref = Regex::new(r#"ref\(['"]([\w.]+)['"]\)"#).unwrap();

    let mut removed = Vec::new();

    for chain in chains {
        let mut later_record_ids: Vec<String> = Vec::new();

        for file_name in chain.file_names().iter().rev() {
            let path = module_dir.join(chain.kind.dir()).join(file_name);
            if !path.exists() {
                continue;
            }

            let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
                path: path.clone(),
                source: e,
            })?;
            let mut doc = Document::parse(&content).map_err(|e| Error::XmlParse {
                path: path.clone(),
                source: e,
            })?;

            let record_ids: Vec<String> = doc
                .records()
                .iter()
                .filter_map(|r| r.attr("id").map(str::to_string))
                .collect();

            doc.for_each_record_mut(|record| {
                let record_id = record.attr("id").unwrap_or_default().to_string();
                let model = record.attr("model").unwrap_or_default().to_string();

                let dropped = record.remove_children_where(|field| {
                    if field.name != "field" {
                        return false;
                    }
                    if let Some(ref_id) = field.attr("ref") {
                        return later_record_ids.iter().any(|id| id == ref_id);
                    }
                    if let Some(eval) = field.attr("eval") {
                        return eval_ref
                            .captures_iter(eval)
                            .any(|caps| later_record_ids.iter().any(|id| id == &caps[1]));
                    }
                    false
                });

                for field in dropped {
                    removed.push(RemovedField {
                        kind: chain.kind,
                        record_id: record_id.clone(),
                        model: model.clone(),
                        field_name: field.attr("name").unwrap_or_default().to_string(),
                        ref_attr: field.attr("ref").map(str::to_string),
                        eval_attr: field.attr("eval").map(str::to_string),
                    });
                }
            });

            std::fs::write(&path, doc.to_xml()).map_err(|e| Error::FileWrite {
                path: path.clone(),
                source: e,
            })?;

            later_record_ids = record_ids;
        }
    }

    Ok(removed)
}
