//! Sale order line cleanup in `demo/sale_order_line.xml`.

use super::{load_optional, save};
use crate::error::Result;
use std::path::Path;

/// Normalize `name` fields on demo sale order lines.
///
/// Section lines keep their name (wrapped in CDATA, the text is display
/// markup); product lines lose it so the server recomputes it from the
/// product description.
pub fn clean_sale_order_lines(module_dir: &Path) -> Result<()> {
    let path = module_dir.join("demo").join("sale_order_line.xml");
    let Some(mut doc) = load_optional(&path)? else {
        return Ok(());
    };

    doc.for_each_record_mut(|record| {
        let is_section = record
            .field_text("display_type")
            .is_some_and(|t| t.trim() == "line_section");

        if is_section {
            if let Some(name) = record.field_mut("name") {
                if let Some(text) = name.text() {
                    name.set_text_cdata(text);
                }
            }
        } else {
            record.remove_children_where(|field| {
                field.name == "field" && field.attr("name") == Some("name")
            });
        }
    });

    save(&path, &doc)
}
