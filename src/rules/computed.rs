//! Computed-field removal.
//!
//! A field that is computed on the server (readonly, not stored, with
//! dependencies) must not be loaded from data files; the server would
//! either reject it or silently recompute it. Field metadata comes from
//! the running instance, behind a trait so tests and offline runs can
//! substitute a canned source.

use crate::error::Result;
use crate::rules::fields::remove_fields;
use crate::xml::Element;
use std::collections::HashMap;

/// Field metadata relevant to the computed-field rule.
#[derive(Debug, Clone, Default)]
pub struct FieldInfo {
    /// Whether the field is stored in the database.
    pub store: bool,
    /// Whether the field is readonly.
    pub readonly: bool,
    /// Compute dependencies, empty for plain fields.
    pub depends: Vec<String>,
}

impl FieldInfo {
    /// A computed field has dependencies, is readonly and is not stored.
    fn is_computed(&self) -> bool {
        !self.depends.is_empty() && self.readonly && !self.store
    }
}

/// Source of per-model field metadata.
pub trait FieldsSource {
    /// Fetch metadata for every field of `model`.
    fn fields_info(&mut self, model: &str) -> Result<HashMap<String, FieldInfo>>;
}

/// Removes computed fields from record content, caching metadata per model.
#[derive(Debug)]
pub struct ComputedFieldScrubber<S> {
    source: S,
    cache: HashMap<String, HashMap<String, FieldInfo>>,
}

impl<S: FieldsSource> ComputedFieldScrubber<S> {
    /// Wrap a metadata source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Access the underlying metadata source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Remove from `content` every field set in `record` that the model
    /// metadata marks as computed.
    pub fn scrub(&mut self, model: &str, record: &Element, content: &str) -> Result<String> {
        if !self.cache.contains_key(model) {
            let info = self.source.fields_info(model)?;
            self.cache.insert(model.to_string(), info);
        }
        let Some(info) = self.cache.get(model) else {
            return Ok(content.to_string());
        };

        let mut computed: Vec<String> = record
            .descendants("field")
            .iter()
            .filter_map(|field| field.attr("name"))
            .filter(|name| info.get(*name).is_some_and(FieldInfo::is_computed))
            .map(str::to_string)
            .collect();
        computed.sort();
        computed.dedup();

        Ok(remove_fields(content, &computed))
    }
}
