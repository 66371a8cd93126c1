//! Thesis root structure

use serde::{Deserialize, Serialize};

use crate::meta::ThesisMeta;
use crate::section::{Section, SectionKind};
use crate::table::TableData;

/// A complete thesis: metadata, collected sections, and table data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Thesis {
    /// Front-matter metadata
    pub meta: ThesisMeta,
    /// Collected sections in slot order
    pub sections: Vec<Section>,
    /// CSV tables from the results directory
    pub tables: Vec<TableData>,
}

impl Thesis {
    /// Create an empty thesis
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Body of a slot, if collected
    pub fn section(&self, kind: SectionKind) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.body.as_str())
    }

    /// Body of a slot, empty string if absent
    pub fn section_or_empty(&self, kind: SectionKind) -> &str {
        self.section(kind).unwrap_or("")
    }

    /// Whether any section holds content
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lookup() {
        let mut thesis = Thesis::new();
        thesis.push(Section::new(SectionKind::Abstract, "An abstract."));
        assert_eq!(thesis.section(SectionKind::Abstract), Some("An abstract."));
        assert_eq!(thesis.section(SectionKind::Method), None);
        assert_eq!(thesis.section_or_empty(SectionKind::Method), "");
    }

    #[test]
    fn test_empty_thesis() {
        let thesis = Thesis::new();
        assert!(thesis.is_empty());
    }
}
