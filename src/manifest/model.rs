//! Manifest value model.

/// A value in the manifest dict literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Quoted string.
    Str(String),
    /// Integer literal.
    Int(i64),
    /// `True` / `False`.
    Bool(bool),
    /// List of values.
    List(Vec<Value>),
    /// Nested dict, key order preserved.
    Dict(Vec<(String, Value)>),
}

impl Value {
    /// Borrow the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list content, if this is a list value.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Build a list value from string-ish items.
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Self::Str(s.into())).collect())
    }
}

/// An ordered manifest dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Key/value entries in file order.
    pub entries: Vec<(String, Value)>,
}

impl Manifest {
    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a value mutably by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set a key, replacing an existing entry in place or appending.
    pub fn set(&mut self, key: &str, value: Value) {
        if let Some(slot) = self.get_mut(key) {
            *slot = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    /// Remove a key, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// String items of a list entry, cloned.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove one string item from a list entry, if present.
    pub fn remove_list_item(&mut self, key: &str, item: &str) {
        if let Some(Value::List(items)) = self.get_mut(key) {
            items.retain(|v| v.as_str() != Some(item));
        }
    }

    /// Append one string item to a list entry, creating the list if needed.
    pub fn push_list_item(&mut self, key: &str, item: impl Into<String>) {
        match self.get_mut(key) {
            Some(Value::List(items)) => items.push(Value::Str(item.into())),
            Some(_) | None => self.set(key, Value::string_list([item.into()])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut manifest = Manifest::default();
        manifest.set("name", Value::Str("a".into()));
        manifest.set("version", Value::Str("1.0".into()));
        manifest.set("name", Value::Str("b".into()));

        assert_eq!(manifest.entries.len(), 2);
        assert_eq!(manifest.entries[0].0, "name");
        assert_eq!(manifest.get("name").and_then(Value::as_str), Some("b"));
    }

    #[test]
    fn test_list_helpers() {
        let mut manifest = Manifest::default();
        manifest.set("data", Value::string_list(["a.xml", "b.xml"]));
        manifest.remove_list_item("data", "a.xml");
        manifest.push_list_item("data", "c.xml");

        assert_eq!(manifest.string_list("data"), vec!["b.xml", "c.xml"]);
    }
}
