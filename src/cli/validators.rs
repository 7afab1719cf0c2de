//! CLI argument validators.

/// Parse and validate a module/category slug.
///
/// Slugs become XML ids, directory names and subdomains, so only
/// lowercase letters, digits, underscores and hyphens are accepted, and
/// the first character must be a letter.
pub fn parse_slug(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("slug must not be empty".to_string());
    }
    if !s.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
        return Err(format!("'{s}' must start with a lowercase letter"));
    }
    if let Some(bad) = s
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-'))
    {
        return Err(format!(
            "'{s}' contains '{bad}'; only lowercase letters, digits, '_' and '-' are allowed"
        ));
    }
    Ok(s.to_string())
}

/// Parse and validate a server port.
pub fn parse_port(s: &str) -> Result<u16, String> {
    let port: u16 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid port number"))?;
    if port == 0 {
        return Err("port must be between 1 and 65535".to_string());
    }
    Ok(port)
}
