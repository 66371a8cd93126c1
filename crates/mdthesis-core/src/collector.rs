//! Section collection over the fixed directory convention
//!
//! The paper directory holds one subdirectory per part of the thesis:
//!
//! ```text
//! paper/
//!   0_overview/0_0_title.md
//!   0_overview/0_1_author.md
//!   0_overview/0_2_contents.md
//!   0_overview/0_3_abstract.md
//!   1_introduction/1_introduction.md
//!   2_background/*.md
//!   3_method/*.md
//!   4_experiments_and_results/*.md
//!   5_conclusion/5_conclusion.md
//!   6_reference/6_reference.md
//! ```
//!
//! Single-file slots are optional: an absent file simply leaves the slot
//! uncollected. Multi-file chapters are globbed, sorted lexicographically,
//! and joined with one blank line.

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use log::warn;

use mdthesis_model::{Section, SectionKind};

use crate::error::{CoreError, Result};

/// Slot source within the paper directory
enum SlotSource {
    /// A single optional file
    File(&'static str),
    /// All `*.md` files of a subdirectory, sorted
    Dir(&'static str),
}

/// Collection order and sources
const SLOTS: [(SectionKind, SlotSource); 10] = [
    (SectionKind::Title, SlotSource::File("0_overview/0_0_title.md")),
    (SectionKind::Author, SlotSource::File("0_overview/0_1_author.md")),
    (SectionKind::Contents, SlotSource::File("0_overview/0_2_contents.md")),
    (SectionKind::Abstract, SlotSource::File("0_overview/0_3_abstract.md")),
    (
        SectionKind::Introduction,
        SlotSource::File("1_introduction/1_introduction.md"),
    ),
    (SectionKind::Background, SlotSource::Dir("2_background")),
    (SectionKind::Method, SlotSource::Dir("3_method")),
    (SectionKind::Results, SlotSource::Dir("4_experiments_and_results")),
    (
        SectionKind::Conclusion,
        SlotSource::File("5_conclusion/5_conclusion.md"),
    ),
    (
        SectionKind::References,
        SlotSource::File("6_reference/6_reference.md"),
    ),
];

/// Collects section fragments from the paper directory
pub struct SectionCollector {
    paper_dir: PathBuf,
}

impl SectionCollector {
    /// Create a collector rooted at the paper directory
    pub fn new(paper_dir: impl Into<PathBuf>) -> Self {
        Self {
            paper_dir: paper_dir.into(),
        }
    }

    /// Collect every present slot in convention order
    ///
    /// A missing paper directory is an error; a missing slot is not.
    pub fn collect(&self) -> Result<Vec<Section>> {
        if !self.paper_dir.is_dir() {
            return Err(CoreError::PaperDirNotFound(self.paper_dir.clone()));
        }

        let mut sections = Vec::new();
        for (kind, source) in &SLOTS {
            let body = match source {
                SlotSource::File(rel) => {
                    let path = self.paper_dir.join(rel);
                    if !path.exists() {
                        log::debug!("slot {} absent ({})", kind.as_str(), path.display());
                        continue;
                    }
                    read_fragment(&path)
                }
                SlotSource::Dir(rel) => self.collect_dir(&self.paper_dir.join(rel))?,
            };
            sections.push(Section::new(*kind, body));
        }
        Ok(sections)
    }

    /// Read and join every markdown fragment of a chapter directory
    fn collect_dir(&self, dir: &Path) -> Result<String> {
        let pattern = dir.join("*.md");
        let mut paths: Vec<PathBuf> = glob(&pattern.to_string_lossy())?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("skipping unreadable glob entry: {}", e);
                    None
                }
            })
            .collect();
        paths.sort();

        let fragments: Vec<String> = paths
            .iter()
            .map(|path| read_fragment(path))
            .filter(|content| !content.is_empty())
            .collect();
        Ok(fragments.join("\n\n"))
    }
}

/// Read a fragment, trimmed; unreadable files degrade to empty with a warning
fn read_fragment(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content.trim().to_string(),
        Err(e) => {
            warn!("failed to read {}: {}", path.display(), e);
            String::new()
        }
    }
}
