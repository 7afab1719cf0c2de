//! Manifest serialization.
//!
//! Emits the conventional four-space indented, single-quoted, trailing
//! comma format the platform's own module manifests use.

use super::model::{Manifest, Value};

/// Serialize a manifest back to its dict-literal form.
pub fn write_manifest(manifest: &Manifest) -> String {
    let mut out = String::from("{\n");
    for (key, value) in &manifest.entries {
        out.push_str("    '");
        out.push_str(&escape(key));
        out.push_str("': ");
        write_value(value, 1, &mut out);
        out.push_str(",\n");
    }
    out.push_str("}\n");
    out
}

fn write_value(value: &Value, depth: usize, out: &mut String) {
    let pad = "    ".repeat(depth + 1);
    let close_pad = "    ".repeat(depth);
    match value {
        Value::Str(s) => {
            out.push('\'');
            out.push_str(&escape(s));
            out.push('\'');
        }
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::List(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for item in items {
                out.push_str(&pad);
                write_value(item, depth + 1, out);
                out.push_str(",\n");
            }
            out.push_str(&close_pad);
            out.push(']');
        }
        Value::Dict(entries) => {
            if entries.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{\n");
            for (key, item) in entries {
                out.push_str(&pad);
                out.push('\'');
                out.push_str(&escape(key));
                out.push_str("': ");
                write_value(item, depth + 1, out);
                out.push_str(",\n");
            }
            out.push_str(&close_pad);
            out.push('}');
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::parser::parse_manifest;
    use super::*;

    #[test]
    fn test_write_simple_manifest() {
        let mut manifest = Manifest::default();
        manifest.set("name", Value::Str("Bakery".into()));
        manifest.set("depends", Value::string_list(["base", "knowledge"]));

        let text = write_manifest(&manifest);
        assert_eq!(
            text,
            "{\n    'name': 'Bakery',\n    'depends': [\n        'base',\n        'knowledge',\n    ],\n}\n"
        );
    }

    #[test]
    fn test_write_nested_dict() {
        let mut manifest = Manifest::default();
        manifest.set(
            "assets",
            Value::Dict(vec![(
                "web.assets_backend".to_string(),
                Value::string_list(["bakery/static/src/js/my_tour.js"]),
            )]),
        );

        let text = write_manifest(&manifest);
        assert!(text.contains("    'assets': {\n        'web.assets_backend': [\n"));
        assert!(text.contains("            'bakery/static/src/js/my_tour.js',\n"));
    }

    #[test]
    fn test_writer_output_reparses() {
        let mut manifest = Manifest::default();
        manifest.set("name", Value::Str("O'Brien".into()));
        manifest.set("application", Value::Bool(true));
        manifest.set("sequence", Value::Int(-5));
        manifest.set("data", Value::string_list(["data/a.xml"]));

        let reparsed = parse_manifest(&write_manifest(&manifest)).unwrap();
        assert_eq!(reparsed, manifest);
    }
}
