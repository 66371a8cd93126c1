//! Section slots and their ordering
//!
//! A thesis is assembled from ten fixed slots. The first four are
//! front-matter (title page and abstract material); the remaining six are
//! the numbered chapters, emitted in `CHAPTERS` order.

use serde::{Deserialize, Serialize};

/// The fixed slots of the thesis directory convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Document title (front matter)
    Title,
    /// Author information, one `key: value` per line (front matter)
    Author,
    /// Hand-written table of contents (front matter, superseded by pandoc's)
    Contents,
    /// Abstract (front matter)
    Abstract,
    /// Chapter 1
    Introduction,
    /// Chapter 2
    Background,
    /// Chapter 3
    Method,
    /// Chapter 4
    Results,
    /// Chapter 5
    Conclusion,
    /// Chapter 6
    References,
}

/// Chapter slots in emission order
pub const CHAPTERS: [SectionKind; 6] = [
    SectionKind::Introduction,
    SectionKind::Background,
    SectionKind::Method,
    SectionKind::Results,
    SectionKind::Conclusion,
    SectionKind::References,
];

impl SectionKind {
    /// Stable identifier used in config keys and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Title => "title",
            SectionKind::Author => "author",
            SectionKind::Contents => "contents",
            SectionKind::Abstract => "abstract",
            SectionKind::Introduction => "introduction",
            SectionKind::Background => "background",
            SectionKind::Method => "method",
            SectionKind::Results => "results",
            SectionKind::Conclusion => "conclusion",
            SectionKind::References => "references",
        }
    }

    /// Default chapter heading, `None` for front-matter slots
    pub fn default_heading(&self) -> Option<&'static str> {
        match self {
            SectionKind::Introduction => Some("Introduction"),
            SectionKind::Background => Some("Background"),
            SectionKind::Method => Some("Method"),
            SectionKind::Results => Some("Experiments and Results"),
            SectionKind::Conclusion => Some("Conclusion and Future Work"),
            SectionKind::References => Some("References"),
            _ => None,
        }
    }

    /// Whether this slot is a numbered chapter
    pub fn is_chapter(&self) -> bool {
        self.default_heading().is_some()
    }

    /// Chapter number (1-based), `None` for front-matter slots
    pub fn chapter_number(&self) -> Option<usize> {
        CHAPTERS.iter().position(|k| k == self).map(|i| i + 1)
    }
}

/// A collected section: slot plus raw markdown body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Which slot this content fills
    pub kind: SectionKind,
    /// Raw markdown body, trimmed
    pub body: String,
}

impl Section {
    /// Create a section
    pub fn new(kind: SectionKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }

    /// Whether the body holds any content
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
