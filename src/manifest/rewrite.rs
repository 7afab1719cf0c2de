//! Manifest rewrite rules.
//!
//! Two passes mirror the cleanup flow: [`rewrite_manifest`] runs while the
//! export tree is being mirrored (renames the module, filters the
//! dependency list, injects the scaffold data files), and
//! [`finalize_manifest`] runs once the demo file order and circular
//! dependency mapping are known.

use super::model::{Manifest, Value};
use crate::constants::{INJECTED_DATA_FILES, manifest_defaults};

/// Inputs shared by both manifest passes.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Target module slug (e.g. `bakery_shop`).
    pub module_name: String,
    /// Title-cased module name used for the manifest `name`.
    pub module_title: String,
    /// Title-cased category.
    pub category_title: String,
    /// Dependencies stripped from `depends`.
    pub unwanted_depends: Vec<String>,
    /// Dependencies merged into `depends`.
    pub required_depends: Vec<String>,
    /// Manifest `author` value.
    pub author: String,
    /// Manifest `license` value.
    pub license: String,
    /// Manifest `version` value.
    pub version: String,
}

impl RewriteOptions {
    /// Build options for a module/category pair with the default
    /// automated manifest values.
    pub fn new(module_name: &str, category: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            module_title: title_case(module_name),
            category_title: title_case(category),
            unwanted_depends: Vec::new(),
            required_depends: Vec::new(),
            author: manifest_defaults::AUTHOR.to_string(),
            license: manifest_defaults::LICENSE.to_string(),
            version: manifest_defaults::VERSION.to_string(),
        }
    }
}

/// Title-case a slug: underscores and hyphens become spaces, every word
/// starts uppercase ("pet_shop" -> "Pet Shop").
pub fn title_case(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut prev_alpha = false;
    for c in slug.chars() {
        if c == '_' || c == '-' {
            out.push(' ');
            prev_alpha = false;
        } else if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// First manifest pass, applied when the export's manifest is mirrored.
pub fn rewrite_manifest(manifest: &Manifest, opts: &RewriteOptions) -> Manifest {
    let mut out = Manifest::default();
    for (key, value) in &manifest.entries {
        match key.as_str() {
            "name" => out.set("name", Value::Str(opts.module_title.clone())),
            "description" => {}
            "author" => out.set("author", Value::Str(opts.author.clone())),
            "category" => out.set("category", Value::Str(opts.category_title.clone())),
            "license" => out.set("license", Value::Str(opts.license.clone())),
            "version" => out.set("version", Value::Str(opts.version.clone())),
            "images" => out.set("images", Value::string_list([manifest_defaults::IMAGE])),
            "depends" => {
                let depends: Vec<Value> = value
                    .as_list()
                    .unwrap_or_default()
                    .iter()
                    .filter(|item| {
                        item.as_str().is_none_or(|dep| {
                            !dep.starts_with("theme_")
                                && !opts.unwanted_depends.iter().any(|u| u == dep)
                        })
                    })
                    .cloned()
                    .collect();
                out.set("depends", Value::List(depends));
            }
            "data" => {
                let mut data: Vec<Value> = value.as_list().unwrap_or_default().to_vec();
                data.extend(INJECTED_DATA_FILES.iter().map(|f| Value::Str((*f).to_string())));
                out.set("data", Value::List(data));
            }
            _ => out.set(key, value.clone()),
        }
    }
    out
}

/// Final manifest pass: merge required dependencies, install the ordered
/// demo list, and append the static tail entries.
pub fn finalize_manifest(manifest: &mut Manifest, demo_files: Vec<String>, opts: &RewriteOptions) {
    let mut depends = manifest.string_list("depends");
    for required in &opts.required_depends {
        if !depends.contains(required) {
            depends.push(required.clone());
        }
    }
    depends.sort();
    depends.dedup();
    manifest.set("depends", Value::string_list(depends));

    manifest.set("demo", Value::string_list(demo_files));

    manifest.set(
        "assets",
        Value::Dict(vec![(
            "web.assets_backend".to_string(),
            Value::string_list([format!("{}/static/src/js/my_tour.js", opts.module_name)]),
        )]),
    );
    manifest.set(
        "cloc_exclude",
        Value::string_list(["data/knowledge_article.xml", "static/src/js/my_tour.js"]),
    );
    manifest.set("images", Value::string_list([manifest_defaults::IMAGE]));
}
