//! Configuration type definitions.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_LOGIN, DEFAULT_PASSWORD, manifest_defaults};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Automated manifest values.
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Extensions to the built-in rule tables.
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the running instance, without port.
    pub base_url: String,

    /// Admin login.
    pub login: String,

    /// Admin password.
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login: DEFAULT_LOGIN.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

/// Automated manifest values forced onto rewritten manifests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Manifest `author`.
    pub author: String,

    /// Manifest `license`.
    pub license: String,

    /// Manifest `version`.
    pub version: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            author: manifest_defaults::AUTHOR.to_string(),
            license: manifest_defaults::LICENSE.to_string(),
            version: manifest_defaults::VERSION.to_string(),
        }
    }
}

/// Extensions to the built-in rule tables.
///
/// These only ever extend the built-ins; the default behavior cannot be
/// narrowed from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Extra fields removed from every XML file.
    pub extra_unwanted_fields: Vec<String>,

    /// Extra dependencies stripped from the manifest.
    pub extra_unwanted_depends: Vec<String>,

    /// Dependencies merged into every manifest.
    pub required_depends: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            extra_unwanted_fields: Vec::new(),
            extra_unwanted_depends: Vec::new(),
            required_depends: crate::constants::REQUIRED_DEPENDS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Built-in plus configured unwanted fields.
    pub fn unwanted_fields(&self) -> Vec<String> {
        crate::constants::UNWANTED_FIELDS
            .iter()
            .map(|s| (*s).to_string())
            .chain(self.rules.extra_unwanted_fields.iter().cloned())
            .collect()
    }

    /// Built-in plus configured unwanted dependencies.
    pub fn unwanted_depends(&self) -> Vec<String> {
        crate::constants::UNWANTED_DEPENDS
            .iter()
            .map(|s| (*s).to_string())
            .chain(self.rules.extra_unwanted_depends.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost");
        assert_eq!(config.server.login, "admin");
        assert_eq!(config.manifest.license, "OPL-1");
        assert_eq!(config.rules.required_depends, vec!["knowledge"]);
    }

    #[test]
    fn test_rule_tables_extend_builtins() {
        let mut config = Config::default();
        config
            .rules
            .extra_unwanted_fields
            .push("x_legacy".to_string());

        let fields = config.unwanted_fields();
        assert!(fields.iter().any(|f| f == "color"));
        assert!(fields.iter().any(|f| f == "x_legacy"));

        let depends = config.unwanted_depends();
        assert!(depends.iter().any(|d| d == "web_studio"));
    }
}
