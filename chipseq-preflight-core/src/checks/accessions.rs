//! SRR accession list

use std::path::Path;

use tracing::debug;

use crate::report::AccessionSummary;

/// Sample accessions, one per non-blank line, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessionList {
    ids: Vec<String>,
}

impl AccessionList {
    /// Read an accession list from disk
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let list = Self::parse(&content);
        debug!(path = %path.display(), samples = list.len(), "loaded accession list");
        Ok(list)
    }

    /// Parse accession text; lines are trimmed and blank lines dropped
    pub fn parse(content: &str) -> Self {
        let ids = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { ids }
    }

    /// Number of accessions
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the list has no accessions
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// First accession
    pub fn first(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    /// Last accession
    pub fn last(&self) -> Option<&str> {
        self.ids.last().map(String::as_str)
    }

    /// All accessions
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Count and bounds for the report
    pub fn summary(&self) -> AccessionSummary {
        AccessionSummary {
            total: self.len(),
            first: self.first().map(str::to_string),
            last:  self.last().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_and_whitespace_ignored() {
        let list = AccessionList::parse("SRR5344681\n\n  SRR5344682  \r\n\t\nSRR5344683\n");
        assert_eq!(list.len(), 3);
        assert_eq!(list.ids()[1], "SRR5344682");
        assert_eq!(list.first(), Some("SRR5344681"));
        assert_eq!(list.last(), Some("SRR5344683"));
    }

    #[test]
    fn test_single_entry_is_first_and_last() {
        let summary = AccessionList::parse("SRR1\n").summary();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.first.as_deref(), Some("SRR1"));
        assert_eq!(summary.last.as_deref(), Some("SRR1"));
    }

    #[test]
    fn test_empty_list_has_no_bounds() {
        let list = AccessionList::parse("\n   \n");
        assert!(list.is_empty());
        let summary = list.summary();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.first, None);
        assert_eq!(summary.last, None);
    }

    #[test]
    fn test_load_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AccessionList::load(dir.path()).is_err());
    }
}
