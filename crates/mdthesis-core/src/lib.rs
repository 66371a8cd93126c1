//! mdthesis-core - Thesis collection and assembly
//!
//! Core library for mdthesis. Gathers per-section markdown fragments from a
//! fixed directory convention, normalizes image references, stages plot
//! assets, and assembles a single pandoc-flavored markdown document with
//! YAML front matter and a LaTeX title page.
//!
//! # Example
//!
//! ```no_run
//! use mdthesis_core::config::ProjectConfig;
//! use mdthesis_core::collector::SectionCollector;
//! use mdthesis_core::assembler::ThesisAssembler;
//! use mdthesis_model::Thesis;
//!
//! let config = ProjectConfig::load(None)?;
//! let sections = SectionCollector::new(&config.paths.paper_dir).collect()?;
//!
//! let mut thesis = Thesis::new();
//! thesis.sections = sections;
//! thesis.meta = config.document_meta(&thesis);
//!
//! let markdown = ThesisAssembler::with_config(config.assembler_config())
//!     .assemble(&thesis)?;
//! # Ok::<(), mdthesis_core::CoreError>(())
//! ```

pub mod assembler;
pub mod collector;
pub mod config;
pub mod error;
pub mod images;
pub mod tables;

pub use assembler::{assemble, AssemblerConfig, ThesisAssembler};
pub use collector::SectionCollector;
pub use config::ProjectConfig;
pub use error::{CoreError, Result};
pub use images::{rewrite_image_paths, AssetStager, StagedAssets};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
