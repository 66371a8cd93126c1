//! Pandoc front-matter metadata
//!
//! `ThesisMeta` serializes to the YAML mapping pandoc reads from the
//! document header. Field names follow pandoc's variable names exactly
//! (`toc-depth`, `numbersections`), so the struct can be dumped with
//! `serde_yaml` without any post-processing.

use serde::{Deserialize, Serialize};

/// Metadata injected as the YAML front-matter block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThesisMeta {
    /// Document title
    pub title: String,
    /// Author display name
    pub author: String,
    /// Date string (`YYYY-MM-DD`); filled with today when left empty
    pub date: String,
    /// Document language code (e.g. "en", "ko")
    pub lang: String,
    /// Paper size (e.g. "a4")
    pub papersize: String,
    /// Base font size (e.g. "12pt")
    pub fontsize: String,
    /// Line spread factor
    pub linestretch: f64,
    /// Main body font, omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mainfont: Option<String>,
    /// Sans-serif font, omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sansfont: Option<String>,
    /// Monospace font, omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monofont: Option<String>,
    /// Page geometry entries (e.g. "top=30mm")
    pub geometry: Vec<String>,
    /// Color hyperlinks instead of boxing them
    pub colorlinks: bool,
    /// Table of contents link color
    pub toccolor: String,
    /// Internal link color
    pub linkcolor: String,
    /// External URL color
    pub urlcolor: String,
    /// Emit a table of contents
    pub toc: bool,
    /// Heading depth included in the table of contents
    #[serde(rename = "toc-depth")]
    pub toc_depth: u8,
    /// Number sections in the rendered output
    pub numbersections: bool,
}

impl Default for ThesisMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            date: String::new(),
            lang: "en".to_string(),
            papersize: "a4".to_string(),
            fontsize: "12pt".to_string(),
            linestretch: 1.6,
            mainfont: None,
            sansfont: None,
            monofont: None,
            geometry: vec![
                "top=30mm".to_string(),
                "bottom=25mm".to_string(),
                "left=30mm".to_string(),
                "right=25mm".to_string(),
            ],
            colorlinks: true,
            toccolor: "Maroon".to_string(),
            linkcolor: "NavyBlue".to_string(),
            urlcolor: "Blue".to_string(),
            toc: true,
            toc_depth: 3,
            numbersections: true,
        }
    }
}

impl ThesisMeta {
    /// Create metadata with a title, everything else defaulted
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// The `-V key=value` pairs passed to pandoc for PDF rendering
    ///
    /// Geometry is collapsed to a single margin variable the way the
    /// pandoc/xelatex template expects it on the command line.
    pub fn pdf_variables(&self) -> Vec<(String, String)> {
        let mut vars = vec![
            ("lang".to_string(), self.lang.clone()),
            ("papersize".to_string(), self.papersize.clone()),
            ("fontsize".to_string(), self.fontsize.clone()),
            ("linestretch".to_string(), self.linestretch.to_string()),
        ];
        if let Some(ref font) = self.mainfont {
            vars.push(("mainfont".to_string(), font.clone()));
        }
        if let Some(ref font) = self.sansfont {
            vars.push(("sansfont".to_string(), font.clone()));
        }
        if let Some(ref font) = self.monofont {
            vars.push(("monofont".to_string(), font.clone()));
        }
        vars.push(("geometry:margin".to_string(), "3cm".to_string()));
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_meta() {
        let meta = ThesisMeta::default();
        assert_eq!(meta.lang, "en");
        assert_eq!(meta.papersize, "a4");
        assert_eq!(meta.toc_depth, 3);
        assert!(meta.toc);
        assert!(meta.numbersections);
        assert_eq!(meta.geometry.len(), 4);
    }

    #[test]
    fn test_yaml_key_names() {
        let meta = ThesisMeta::with_title("Test");
        let yaml = serde_yaml::to_string(&meta).unwrap();
        assert!(yaml.contains("title: Test"));
        assert!(yaml.contains("toc-depth: 3"));
        assert!(yaml.contains("numbersections: true"));
        // Unset fonts must not appear in the front matter
        assert!(!yaml.contains("mainfont"));
    }

    #[test]
    fn test_yaml_includes_fonts_when_set() {
        let mut meta = ThesisMeta::default();
        meta.mainfont = Some("Noto Serif".to_string());
        let yaml = serde_yaml::to_string(&meta).unwrap();
        assert!(yaml.contains("mainfont: Noto Serif"));
    }

    #[test]
    fn test_pdf_variables() {
        let mut meta = ThesisMeta::default();
        meta.monofont = Some("D2Coding".to_string());
        let vars = meta.pdf_variables();
        assert!(vars.contains(&("lang".to_string(), "en".to_string())));
        assert!(vars.contains(&("monofont".to_string(), "D2Coding".to_string())));
        assert!(vars.contains(&("geometry:margin".to_string(), "3cm".to_string())));
        // Unset fonts are skipped
        assert!(!vars.iter().any(|(k, _)| k == "mainfont"));
    }
}
