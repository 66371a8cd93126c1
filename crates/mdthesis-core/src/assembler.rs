//! Thesis markdown assembly
//!
//! Converts a collected `Thesis` into the single pandoc-flavored markdown
//! document handed to the renderer: YAML front matter, a LaTeX title page,
//! the abstract, then the numbered chapters.
//!
//! # Example
//!
//! ```
//! use mdthesis_core::assembler::assemble;
//! use mdthesis_model::{Section, SectionKind, Thesis, ThesisMeta};
//!
//! let mut thesis = Thesis::new();
//! thesis.meta = ThesisMeta::with_title("Forecasting PM2.5");
//! thesis.push(Section::new(SectionKind::Introduction, "Air quality matters."));
//!
//! let markdown = assemble(&thesis).unwrap();
//! assert!(markdown.starts_with("---\n"));
//! assert!(markdown.contains("# Introduction"));
//! ```

use std::fmt::Write;
use std::sync::OnceLock;

use regex::Regex;

use mdthesis_model::{SectionKind, Thesis, CHAPTERS};

use crate::config::HeadingsConfig;
use crate::error::Result;

/// Assembler configuration
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Institution line on the title page, omitted when empty
    pub institution: String,
    /// Degree note line on the title page
    pub degree_note: String,
    /// Append collected tables as a final appendix
    pub tables_appendix: bool,
    /// Heading overrides per slot
    pub headings: HeadingsConfig,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            institution: String::new(),
            degree_note: "Master's Thesis".to_string(),
            tables_appendix: false,
            headings: HeadingsConfig::default(),
        }
    }
}

/// Assembles the final markdown document
pub struct ThesisAssembler {
    config: AssemblerConfig,
    output: String,
}

impl ThesisAssembler {
    /// Create an assembler with default configuration
    pub fn new() -> Self {
        Self::with_config(AssemblerConfig::default())
    }

    /// Create an assembler with custom configuration
    pub fn with_config(config: AssemblerConfig) -> Self {
        Self {
            config,
            output: String::new(),
        }
    }

    /// Assemble the complete document
    pub fn assemble(&mut self, thesis: &Thesis) -> Result<String> {
        self.output.clear();

        self.front_matter(thesis)?;
        self.title_page(thesis);
        self.abstract_section(thesis);

        // The hand-written contents slot is superseded by pandoc's toc
        if thesis.section(SectionKind::Contents).is_some() {
            log::debug!("contents section present, superseded by generated toc");
        }

        writeln!(self.output, "\\newpage\n").unwrap();

        for kind in CHAPTERS {
            self.chapter(thesis, kind);
        }

        if self.config.tables_appendix && !thesis.tables.is_empty() {
            let heading = self
                .config
                .headings
                .tables
                .as_deref()
                .unwrap_or("Data Tables");
            writeln!(
                self.output,
                "{}",
                crate::tables::tables_appendix(&thesis.tables, heading)
            )
            .unwrap();
        }

        Ok(format!("{}\n", self.output.trim_end()))
    }

    /// YAML front matter between `---` fences
    fn front_matter(&mut self, thesis: &Thesis) -> Result<()> {
        let yaml = serde_yaml::to_string(&thesis.meta)?;
        writeln!(self.output, "---\n{}\n---\n", yaml.trim_end()).unwrap();
        Ok(())
    }

    /// LaTeX title page environment
    fn title_page(&mut self, thesis: &Thesis) {
        writeln!(self.output, "\\begin{{titlepage}}").unwrap();
        writeln!(self.output, "\\begin{{center}}").unwrap();
        writeln!(self.output, "\\vspace*{{2cm}}\n").unwrap();
        writeln!(self.output, "\\LARGE\\textbf{{{}}}\n", thesis.meta.title).unwrap();
        writeln!(self.output, "\\vspace{{1.5cm}}\n").unwrap();
        writeln!(self.output, "\\large {}\n", self.config.degree_note).unwrap();
        writeln!(self.output, "\\vspace{{2cm}}\n").unwrap();

        for (key, value) in author_lines(thesis.section_or_empty(SectionKind::Author)) {
            writeln!(self.output, "\\large {}: {}\\\\", key, value).unwrap();
        }

        writeln!(self.output, "\\vspace{{3cm}}\n").unwrap();
        writeln!(self.output, "\\large\\today\n").unwrap();
        if !self.config.institution.is_empty() {
            writeln!(self.output, "\\vspace{{2cm}}\n").unwrap();
            writeln!(self.output, "\\large {}", self.config.institution).unwrap();
        }
        writeln!(self.output, "\\end{{center}}").unwrap();
        writeln!(self.output, "\\end{{titlepage}}\n").unwrap();
    }

    /// Unnumbered abstract section
    fn abstract_section(&mut self, thesis: &Thesis) {
        let heading = self
            .config
            .headings
            .abstract_heading
            .as_deref()
            .unwrap_or("Abstract");
        let body = strip_leading_heading(thesis.section_or_empty(SectionKind::Abstract), heading);
        writeln!(self.output, "## {}\n", heading).unwrap();
        if !body.is_empty() {
            writeln!(self.output, "{}\n", body).unwrap();
        }
    }

    /// One numbered chapter; emitted even when the slot is empty so the
    /// document structure stays complete
    fn chapter(&mut self, thesis: &Thesis, kind: SectionKind) {
        let heading = self.config.headings.chapter(kind);
        let body = strip_leading_heading(thesis.section_or_empty(kind), &heading);
        writeln!(self.output, "# {}\n", heading).unwrap();
        if !body.is_empty() {
            writeln!(self.output, "{}\n", body).unwrap();
        }
    }
}

impl Default for ThesisAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function with default configuration
pub fn assemble(thesis: &Thesis) -> Result<String> {
    ThesisAssembler::new().assemble(thesis)
}

/// Parse `key: value` author lines, skipping lines without a colon
pub fn author_lines(author_body: &str) -> Vec<(String, String)> {
    author_body
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let (key, value) = (key.trim(), value.trim());
            (!key.is_empty() && !value.is_empty())
                .then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}

/// Strip a redundant leading heading from a fragment body
///
/// Fragment files carry their own `1. Introduction`-style titles, which
/// would double-number under the emitted chapter headings. The first
/// non-blank line is removed when it is a level-1 markdown heading, a
/// top-level numbered title, or the chapter heading itself. Deeper
/// headings (`##`, `2.1 …`) are content and stay.
fn strip_leading_heading<'a>(body: &'a str, heading: &str) -> &'a str {
    static NUMBERED_RE: OnceLock<Regex> = OnceLock::new();
    let numbered = NUMBERED_RE.get_or_init(|| Regex::new(r"^\d+\.?\s+\S").unwrap());

    let trimmed = body.trim();
    let Some(first_line) = trimmed.lines().next() else {
        return trimmed;
    };

    let is_redundant = (first_line.starts_with("# "))
        || numbered.is_match(first_line)
        || first_line.trim().eq_ignore_ascii_case(heading);

    if is_redundant {
        trimmed[first_line.len()..].trim_start()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdthesis_model::{Section, TableData, ThesisMeta};

    fn sample_thesis() -> Thesis {
        let mut thesis = Thesis::new();
        thesis.meta = ThesisMeta::with_title("Forecasting PM2.5");
        thesis.meta.author = "Jane Doe".to_string();
        thesis.meta.date = "2025-06-01".to_string();
        thesis.push(Section::new(
            SectionKind::Author,
            "Name: Jane Doe\nAdvisor: John Roe\njust a note",
        ));
        thesis.push(Section::new(
            SectionKind::Abstract,
            "Abstract\n\nWe forecast PM2.5.",
        ));
        thesis.push(Section::new(
            SectionKind::Introduction,
            "1. Introduction\n\nAir quality matters.",
        ));
        thesis.push(Section::new(
            SectionKind::Method,
            "We used an LSTM.\n\n## 3.1 Data\n\nHourly readings.",
        ));
        thesis
    }

    #[test]
    fn test_front_matter_fences() {
        let md = assemble(&sample_thesis()).unwrap();
        assert!(md.starts_with("---\n"));
        let close = md[4..].find("---\n").unwrap();
        let yaml = &md[4..4 + close];
        assert!(yaml.contains("title: Forecasting PM2.5"));
        assert!(yaml.contains("toc-depth: 3"));
    }

    #[test]
    fn test_title_page() {
        let md = assemble(&sample_thesis()).unwrap();
        assert!(md.contains("\\begin{titlepage}"));
        assert!(md.contains("\\LARGE\\textbf{Forecasting PM2.5}"));
        assert!(md.contains("\\large Master's Thesis"));
        assert!(md.contains("\\large Name: Jane Doe\\\\"));
        assert!(md.contains("\\large Advisor: John Roe\\\\"));
        assert!(md.contains("\\end{titlepage}"));
        // Lines without a colon are skipped
        assert!(!md.contains("just a note"));
        // Empty institution is omitted entirely
        assert!(!md.contains("\\large \n"));
    }

    #[test]
    fn test_abstract_heading_stripped() {
        let md = assemble(&sample_thesis()).unwrap();
        assert!(md.contains("## Abstract\n\nWe forecast PM2.5."));
    }

    #[test]
    fn test_chapter_headings_and_strip() {
        let md = assemble(&sample_thesis()).unwrap();
        assert!(md.contains("# Introduction\n\nAir quality matters."));
        // Subsection headings in the body are preserved
        assert!(md.contains("# Method\n\nWe used an LSTM.\n\n## 3.1 Data"));
        // Empty chapters still emit their heading
        assert!(md.contains("# Conclusion and Future Work"));
        assert!(md.contains("# References"));
    }

    #[test]
    fn test_newpage_between_abstract_and_body() {
        let md = assemble(&sample_thesis()).unwrap();
        let newpage = md.find("\\newpage").unwrap();
        assert!(newpage > md.find("## Abstract").unwrap());
        assert!(newpage < md.find("# Introduction").unwrap());
    }

    #[test]
    fn test_tables_appendix_opt_in() {
        let mut thesis = sample_thesis();
        thesis.tables.push(TableData::new("scores", "m,r\nLSTM,1\n"));

        let without = assemble(&thesis).unwrap();
        assert!(!without.contains("# Data Tables"));

        let config = AssemblerConfig {
            tables_appendix: true,
            ..Default::default()
        };
        let with = ThesisAssembler::with_config(config).assemble(&thesis).unwrap();
        assert!(with.contains("# Data Tables"));
        assert!(with.contains("| LSTM | 1 |"));
    }

    #[test]
    fn test_strip_leading_heading_rules() {
        assert_eq!(strip_leading_heading("# Intro\n\nBody.", "Intro"), "Body.");
        assert_eq!(strip_leading_heading("1. Intro\n\nBody.", "Intro"), "Body.");
        assert_eq!(strip_leading_heading("Intro\n\nBody.", "Intro"), "Body.");
        // Prose first lines are left alone
        assert_eq!(
            strip_leading_heading("Body starts here.", "Intro"),
            "Body starts here."
        );
        // Deeper numbering is content
        assert_eq!(
            strip_leading_heading("2.1 Related work\n\nBody.", "Background"),
            "2.1 Related work\n\nBody."
        );
        assert_eq!(strip_leading_heading("", "Intro"), "");
    }
}
