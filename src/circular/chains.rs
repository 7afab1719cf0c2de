//! `warnings.txt` dependency chain parsing.

use crate::constants::circular::WARNINGS_FILE;
use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;

/// Which load list a chain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    /// `data/` files.
    Data,
    /// `demo/` files.
    Demo,
}

impl ChainKind {
    /// Directory name for this kind.
    pub fn dir(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Demo => "demo",
        }
    }
}

/// One circular dependency chain from the warnings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChain {
    /// Load list the chain's files belong to.
    pub kind: ChainKind,
    /// Record file names (dotted form, as listed) in load order.
    pub chain: Vec<String>,
}

impl DependencyChain {
    /// XML file names for the chain entries (`res.partner` ->
    /// `res_partner.xml`).
    pub fn file_names(&self) -> Vec<String> {
        self.chain
            .iter()
            .map(|entry| format!("{}.xml", entry.replace('.', "_")))
            .collect()
    }
}

/// Parse the export's warnings file, returning the listed chains.
///
/// A missing warnings file, or one without the circular dependency
/// summary line, yields an empty list.
pub fn parse_warnings(export_dir: &Path) -> Result<Vec<DependencyChain>> {
    let path = export_dir.join(WARNINGS_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
        path: path.clone(),
        source: e,
    })?;

    #[allow(clippy::unwrap_used)] // fixed patterns
    let count = Regex::new(r"Found (\d+) circular dependencies").unwrap();
    if !count.is_match(&content) {
        return Ok(Vec::new());
    }

    #[allow(clippy::unwrap_used)]
    let chain_line = Regex::new(r"\((data|demo)\) (.+)").unwrap();
    let chains = chain_line
        .captures_iter(&content)
        .map(|caps| {
            let kind = if &caps[1] == "data" {
                ChainKind::Data
            } else {
                ChainKind::Demo
            };
            DependencyChain {
                kind,
                chain: caps[2].split(" -> ").map(str::to_string).collect(),
            }
        })
        .collect();
    Ok(chains)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_warnings_chains() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("warnings.txt"),
            "Found 2 circular dependencies:\n\
             (data) res.partner -> sale.order -> res.partner\n\
             (demo) knowledge.article -> knowledge.article\n",
        )
        .unwrap();

        let chains = parse_warnings(tmp.path()).unwrap();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].kind, ChainKind::Data);
        assert_eq!(
            chains[0].chain,
            vec!["res.partner", "sale.order", "res.partner"]
        );
        assert_eq!(
            chains[0].file_names(),
            vec!["res_partner.xml", "sale_order.xml", "res_partner.xml"]
        );
        assert_eq!(chains[1].kind, ChainKind::Demo);
    }

    #[test]
    fn test_missing_file_yields_no_chains() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(parse_warnings(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_no_summary_line_yields_no_chains() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("warnings.txt"),
            "(data) res.partner -> sale.order\n",
        )
        .unwrap();
        assert!(parse_warnings(tmp.path()).unwrap().is_empty());
    }
}
