//! mdthesis-model - Document model for thesis assembly
//!
//! Plain data types shared by the collector, assembler, and renderers:
//! pandoc front-matter metadata, section slots, table payloads, and the
//! `Thesis` root that ties them together.

mod document;
mod meta;
mod section;
mod table;

pub use document::Thesis;
pub use meta::ThesisMeta;
pub use section::{Section, SectionKind, CHAPTERS};
pub use table::TableData;
