//! Project configuration
//!
//! `mdthesis.toml` at the project root configures paths, document metadata,
//! and the external toolchain. Every table and field has a default, so an
//! absent or empty file yields a working configuration.
//!
//! ```toml
//! [paths]
//! paper_dir = "paper"
//! output_dir = "output"
//!
//! [document]
//! lang = "ko"
//! mainfont = "NanumMyeongjo"
//! institution = "Seoul School of Integrated Sciences"
//!
//! [toolchain]
//! pdf_engine = "/usr/local/texlive/2025/bin/x86_64-linux/xelatex"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use mdthesis_model::{SectionKind, Thesis, ThesisMeta};

use crate::assembler::AssemblerConfig;
use crate::error::{CoreError, Result};

/// Default config file name looked up in the working directory
pub const CONFIG_FILE: &str = "mdthesis.toml";

/// Top-level project configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Input/output directory layout
    pub paths: PathsConfig,
    /// Document metadata and headings
    pub document: DocumentConfig,
    /// External renderer settings
    pub toolchain: ToolchainConfig,
}

/// Directory layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the per-section markdown fragments
    pub paper_dir: PathBuf,
    /// Root of the research results (CSV tables)
    pub results_dir: PathBuf,
    /// Directory holding the real plot images
    pub plots_dir: PathBuf,
    /// Output directory for the assembled document and staged assets
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            paper_dir: PathBuf::from("paper"),
            results_dir: PathBuf::from("research_results"),
            plots_dir: PathBuf::from("research_results/analysis_plots"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl PathsConfig {
    /// Assembled markdown path
    pub fn markdown_file(&self) -> PathBuf {
        self.output_dir.join("thesis.md")
    }

    /// Rendered PDF path
    pub fn pdf_file(&self) -> PathBuf {
        self.output_dir.join("thesis.pdf")
    }

    /// Rendered HTML path
    pub fn html_file(&self) -> PathBuf {
        self.output_dir.join("thesis.html")
    }

    /// Staged image directory under the output directory
    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join("images")
    }
}

/// Document metadata overrides and title-page strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Title override; defaults to the `0_0_title.md` content
    pub title: Option<String>,
    /// Author override; defaults to the first author-line value
    pub author: Option<String>,
    /// Date override (`YYYY-MM-DD`); defaults to today
    pub date: Option<String>,
    /// Language code
    pub lang: Option<String>,
    /// Paper size
    pub papersize: Option<String>,
    /// Base font size
    pub fontsize: Option<String>,
    /// Line spread factor
    pub linestretch: Option<f64>,
    /// Main body font
    pub mainfont: Option<String>,
    /// Sans-serif font
    pub sansfont: Option<String>,
    /// Monospace font
    pub monofont: Option<String>,
    /// Page geometry entries
    pub geometry: Option<Vec<String>>,
    /// Emit a table of contents
    pub toc: Option<bool>,
    /// Table of contents depth
    pub toc_depth: Option<u8>,
    /// Number sections
    pub numbersections: Option<bool>,
    /// Institution line on the title page
    pub institution: String,
    /// Degree note on the title page
    pub degree_note: String,
    /// Append collected CSV tables as a final appendix
    pub tables_appendix: bool,
    /// Heading overrides per slot
    pub headings: HeadingsConfig,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            date: None,
            lang: None,
            papersize: None,
            fontsize: None,
            linestretch: None,
            mainfont: None,
            sansfont: None,
            monofont: None,
            geometry: None,
            toc: None,
            toc_depth: None,
            numbersections: None,
            institution: String::new(),
            degree_note: "Master's Thesis".to_string(),
            tables_appendix: false,
            headings: HeadingsConfig::default(),
        }
    }
}

/// Per-slot heading overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HeadingsConfig {
    /// Abstract heading (default "Abstract")
    #[serde(rename = "abstract")]
    pub abstract_heading: Option<String>,
    pub introduction: Option<String>,
    pub background: Option<String>,
    pub method: Option<String>,
    pub results: Option<String>,
    pub conclusion: Option<String>,
    pub references: Option<String>,
    /// Tables appendix heading (default "Data Tables")
    pub tables: Option<String>,
}

impl HeadingsConfig {
    /// Resolved heading for a chapter slot
    pub fn chapter(&self, kind: SectionKind) -> String {
        let over = match kind {
            SectionKind::Introduction => &self.introduction,
            SectionKind::Background => &self.background,
            SectionKind::Method => &self.method,
            SectionKind::Results => &self.results,
            SectionKind::Conclusion => &self.conclusion,
            SectionKind::References => &self.references,
            _ => &None,
        };
        over.clone()
            .or_else(|| kind.default_heading().map(str::to_string))
            .unwrap_or_default()
    }
}

/// External toolchain settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Pandoc binary name or path
    pub pandoc: String,
    /// Explicit xelatex path; discovered on PATH when unset
    pub pdf_engine: Option<PathBuf>,
    /// TeX Live bin directory prepended to the child PATH
    pub texlive_bin_dir: Option<PathBuf>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            pandoc: "pandoc".to_string(),
            pdf_engine: None,
            texlive_bin_dir: None,
        }
    }
}

impl ProjectConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration
    ///
    /// Precedence: an explicit path (must exist) > `mdthesis.toml` in the
    /// working directory > built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    return Err(CoreError::ConfigNotFound(p.to_path_buf()));
                }
                p.to_path_buf()
            }
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if !default.exists() {
                    log::debug!("no {} found, using defaults", CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Build front-matter metadata from overrides plus collected sections
    ///
    /// The title falls back to the title section, the author to the value of
    /// the first `key: value` author line, and the date to today.
    pub fn document_meta(&self, thesis: &Thesis) -> ThesisMeta {
        let doc = &self.document;
        let mut meta = ThesisMeta::default();

        meta.title = doc
            .title
            .clone()
            .or_else(|| {
                let title = thesis.section_or_empty(SectionKind::Title).trim();
                (!title.is_empty()).then(|| title.to_string())
            })
            .unwrap_or_else(|| "Untitled Thesis".to_string());

        meta.author = doc
            .author
            .clone()
            .or_else(|| first_author_value(thesis.section_or_empty(SectionKind::Author)))
            .unwrap_or_default();

        meta.date = doc
            .date
            .clone()
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

        if let Some(ref lang) = doc.lang {
            meta.lang = lang.clone();
        }
        if let Some(ref papersize) = doc.papersize {
            meta.papersize = papersize.clone();
        }
        if let Some(ref fontsize) = doc.fontsize {
            meta.fontsize = fontsize.clone();
        }
        if let Some(linestretch) = doc.linestretch {
            meta.linestretch = linestretch;
        }
        meta.mainfont = doc.mainfont.clone();
        meta.sansfont = doc.sansfont.clone();
        meta.monofont = doc.monofont.clone();
        if let Some(ref geometry) = doc.geometry {
            meta.geometry = geometry.clone();
        }
        if let Some(toc) = doc.toc {
            meta.toc = toc;
        }
        if let Some(toc_depth) = doc.toc_depth {
            meta.toc_depth = toc_depth;
        }
        if let Some(numbersections) = doc.numbersections {
            meta.numbersections = numbersections;
        }

        meta
    }

    /// Assembler settings derived from this configuration
    pub fn assembler_config(&self) -> AssemblerConfig {
        AssemblerConfig {
            institution: self.document.institution.clone(),
            degree_note: self.document.degree_note.clone(),
            tables_appendix: self.document.tables_appendix,
            headings: self.document.headings.clone(),
        }
    }
}

/// Value of the first `key: value` line, used as the author fallback
fn first_author_value(author_body: &str) -> Option<String> {
    author_body.lines().find_map(|line| {
        let (_, value) = line.split_once(':')?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdthesis_model::Section;

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = ProjectConfig::from_toml_str("").unwrap();
        assert_eq!(config.paths.paper_dir, PathBuf::from("paper"));
        assert_eq!(config.toolchain.pandoc, "pandoc");
        assert_eq!(config.document.degree_note, "Master's Thesis");
        assert!(!config.document.tables_appendix);
    }

    #[test]
    fn test_partial_toml() {
        let config = ProjectConfig::from_toml_str(
            r#"
            [paths]
            output_dir = "build"

            [document]
            lang = "ko"
            mainfont = "NanumMyeongjo"

            [document.headings]
            results = "Experimente und Ergebnisse"

            [toolchain]
            pdf_engine = "/opt/texlive/bin/xelatex"
            "#,
        )
        .unwrap();
        assert_eq!(config.paths.output_dir, PathBuf::from("build"));
        // Untouched tables keep their defaults
        assert_eq!(config.paths.paper_dir, PathBuf::from("paper"));
        assert_eq!(config.document.lang.as_deref(), Some("ko"));
        assert_eq!(
            config.document.headings.chapter(SectionKind::Results),
            "Experimente und Ergebnisse"
        );
        assert_eq!(
            config.document.headings.chapter(SectionKind::Method),
            "Method"
        );
        assert_eq!(
            config.toolchain.pdf_engine.as_deref(),
            Some(Path::new("/opt/texlive/bin/xelatex"))
        );
    }

    #[test]
    fn test_document_meta_fallbacks() {
        let config = ProjectConfig::default();
        let mut thesis = Thesis::new();
        thesis.push(Section::new(SectionKind::Title, "Forecasting PM2.5"));
        thesis.push(Section::new(
            SectionKind::Author,
            "Name: Jane Doe\nAdvisor: John Roe",
        ));

        let meta = config.document_meta(&thesis);
        assert_eq!(meta.title, "Forecasting PM2.5");
        assert_eq!(meta.author, "Jane Doe");
        assert_eq!(meta.date.len(), 10);
    }

    #[test]
    fn test_document_meta_overrides_win() {
        let config = ProjectConfig::from_toml_str(
            r#"
            [document]
            title = "Configured Title"
            author = "Configured Author"
            date = "2025-01-01"
            "#,
        )
        .unwrap();
        let mut thesis = Thesis::new();
        thesis.push(Section::new(SectionKind::Title, "Section Title"));

        let meta = config.document_meta(&thesis);
        assert_eq!(meta.title, "Configured Title");
        assert_eq!(meta.author, "Configured Author");
        assert_eq!(meta.date, "2025-01-01");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let err = ProjectConfig::load(Some(Path::new("/nonexistent/mdthesis.toml"))).unwrap_err();
        assert!(matches!(err, CoreError::ConfigNotFound(_)));
    }
}
