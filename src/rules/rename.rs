//! Identifier, URL and email rewrites.
//!
//! These are the regex-based renames that turn `studio_customization`
//! artifacts into the target module's namespace and scrub source-instance
//! specifics (subdomains, hardcoded URLs, staff emails) out of the data.

use crate::constants::STUDIO_MODULE;
use regex::Regex;

/// Compiled rename rules for one target module.
#[derive(Debug)]
pub struct IdentifierRules {
    module_name: String,
    env_ref: Regex,
    forcecreate: Regex,
    res_users: Regex,
    view_env_ref: Regex,
    homepage_key: Regex,
    subdomain: Regex,
    url_field: Regex,
    uom_ref: Regex,
    doc_version: Regex,
    email: Regex,
}

impl IdentifierRules {
    /// Compile the rule set for the given module slug.
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            env_ref: compile(r"env\.ref\('studio_customization\.(.*)'"),
            forcecreate: compile(
                r#"(<record\s+[^>]*id="base_module\.[^"]*"[^>]*?")\s+forcecreate="1""#,
            ),
            res_users: compile(r"res_users_\w+"),
            view_env_ref: compile(r"obj\(\)\.env\.ref\('ir_ui_view_"),
            homepage_key: compile(r#"(<field name="key">)website\.homepage(</field>)"#),
            subdomain: compile(r"https://([^/]+)\.odoo\.com"),
            url_field: compile(r#"(<field name="url">)https://[^/]+(.*?</field>)"#),
            uom_ref: compile(r#"\s*<field[^>]*ref="uom\.[^"]*"[^>]*\s*/>"#),
            doc_version: compile(r"(/documentation/)[^/]+"),
            email: compile(r"([a-zA-Z0-9._%+-]+)@odoo\.com"),
        }
    }

    /// Apply every rename rule to the file content.
    pub fn apply(&self, content: &str) -> String {
        let module = self.module_name.as_str();

        // env.ref() calls into the export's namespace move to the module's.
        let content = self
            .env_ref
            .replace_all(content, format!("env.ref('{module}.$1'"));

        // Studio's field prefix is shortened to a plain custom-field prefix.
        let content = content.replace("x_studio_", "x_");
        let content = content.replace(" context=\"{'studio': True}\"", "");

        // The export module's own namespace disappears entirely; path
        // references move under the new module directory.
        let content = content.replace(&format!("{STUDIO_MODULE}/"), &format!("{module}/"));
        let content = content.replace(&format!("{STUDIO_MODULE}."), "");

        let content = self.forcecreate.replace_all(&content, "$1");
        let content = content.replace("base_module.", "");

        let content = self.res_users.replace_all(&content, "base.user_admin");

        let content = self
            .view_env_ref
            .replace_all(&content, format!("obj().env.ref('{module}.ir_ui_view_"));

        let content = self
            .homepage_key
            .replace_all(&content, format!("${{1}}{module}.homepage$2"));

        // Source-instance subdomain links point at the industry subdomain;
        // www links are left alone.
        let dashed = module.replace('_', "-");
        let content = self.subdomain.replace_all(&content, |caps: &regex::Captures<'_>| {
            let host = &caps[1];
            if host == "www" || host.starts_with("www.") {
                caps[0].to_string()
            } else {
                format!("https://{dashed}.odoo.com")
            }
        });

        let content = self.url_field.replace_all(&content, "$1$2");
        let content = self.uom_ref.replace_all(&content, "");
        let content = self.doc_version.replace_all(&content, "${1}latest");

        let content = self.email.replace_all(&content, |caps: &regex::Captures<'_>| {
            format!("{}@example.com", "*".repeat(caps[1].len()))
        });

        content.into_owned()
    }
}

#[allow(clippy::unwrap_used)] // patterns are fixed and covered by tests
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}
