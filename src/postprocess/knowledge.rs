//! Knowledge article cleanup in `data/knowledge_article.xml`.

use super::{load_optional, save};
use crate::error::Result;
use crate::xml::{Element, Node};
use std::path::Path;

/// Keep only the user-authored article, renamed to `welcome_article`.
///
/// Articles referenced from the `knowledge` module itself are removed.
/// The kept article loses its `last_edition_uid`, gets locked, and any
/// HTML body is wrapped in CDATA.
pub fn clean_knowledge_article(module_dir: &Path) -> Result<()> {
    let path = module_dir.join("data").join("knowledge_article.xml");
    let Some(mut doc) = load_optional(&path)? else {
        return Ok(());
    };

    if doc.root.attr("noupdate") == Some("1") {
        doc.root.remove_attr("noupdate");
    }

    retain_user_articles(&mut doc.root);

    save(&path, &doc)
}

fn retain_user_articles(parent: &mut Element) {
    parent.children.retain_mut(|child| {
        let Node::Element(record) = child else {
            return true;
        };
        if record.name != "record" {
            return true;
        }
        if record
            .attr("id")
            .is_some_and(|id| id.starts_with("knowledge."))
        {
            return false;
        }

        record.set_attr("id", "welcome_article");

        for field in record.child_elements_mut() {
            if field.name != "field" {
                continue;
            }
            if let Some(text) = field.text() {
                if text.contains("<div") {
                    field.set_text_cdata(text);
                }
            }
        }

        record.remove_children_where(|field| {
            field.name == "field" && field.attr("name") == Some("last_edition_uid")
        });

        if record.field("is_locked").is_none() {
            let mut locked = Element::new("field");
            locked.set_attr("name", "is_locked");
            locked.set_attr("eval", "True");
            record.children.push(Node::Element(locked));
        }
        true
    });

    for child in parent.child_elements_mut() {
        if child.name != "record" {
            retain_user_articles(child);
        }
    }
}
