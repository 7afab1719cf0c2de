//! Demo file ordering for the manifest.
//!
//! Demo files must load before the files that reference their records.
//! While the walk processes `demo/` files it feeds their records and
//! local references in here; the final list is what the manifest `demo`
//! entry gets.

#[derive(Debug, Clone)]
struct DemoEntry {
    file_name: String,
    refs: Vec<String>,
}

/// Accumulates demo file entries in dependency-aware order.
#[derive(Debug, Default)]
pub struct DemoOrder {
    entries: Vec<DemoEntry>,
}

impl DemoOrder {
    /// Empty order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for a demo file without records (function calls,
    /// menu files).
    pub fn add_recordless_file(&mut self, file_name: &str, refs: Vec<String>) {
        self.entries.push(DemoEntry {
            file_name: file_name.to_string(),
            refs,
        });
    }

    /// Insert an entry for one record of a demo file.
    ///
    /// The entry lands before the first already-seen file that references
    /// this record; a file with no local references goes to the front.
    pub fn insert_for_record(&mut self, file_name: &str, refs: &[String], record_id: &str) {
        let entry = DemoEntry {
            file_name: file_name.to_string(),
            refs: refs.to_vec(),
        };

        if entry.refs.is_empty() {
            self.entries.insert(0, entry);
            return;
        }

        let position = self
            .entries
            .iter()
            .position(|existing| existing.refs.iter().any(|r| r == record_id));
        match position {
            Some(idx) => self.entries.insert(idx, entry),
            None => self.entries.push(entry),
        }
    }

    /// Append a file at the end (scaffolded demo files).
    pub fn push_file(&mut self, file_name: &str) {
        self.entries.push(DemoEntry {
            file_name: file_name.to_string(),
            refs: Vec::new(),
        });
    }

    /// Produce the manifest `demo` list: the website view rename applied,
    /// duplicates collapsed to their first occurrence, `demo/` prefixed.
    pub fn finalize(self) -> Vec<String> {
        let mut seen = Vec::new();
        for entry in self.entries {
            let name = if entry.file_name == "ir_ui_view.xml" {
                "website_view.xml".to_string()
            } else {
                entry.file_name
            };
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen.into_iter().map(|name| format!("demo/{name}")).collect()
    }
}
