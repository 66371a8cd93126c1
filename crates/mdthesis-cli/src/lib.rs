//! mdthesis CLI - Command-line interface library
//!
//! This library provides the CLI functionality for mdthesis:
//! - Build: assemble `output/thesis.md` and stage image assets
//! - Html: render standalone HTML (pandoc, or the builtin formatter)
//! - Pdf: render PDF via pandoc/xelatex
//!
//! # Binary Usage
//!
//! ```bash
//! # Assemble the thesis markdown
//! mdthesis build
//!
//! # Render HTML without a pandoc install
//! mdthesis html --builtin
//!
//! # Render the PDF
//! mdthesis pdf --config mdthesis.toml
//! ```

pub mod app;

// Re-export main entry point and commands
pub use app::{build_command, html_command, pdf_command, run_cli, BuildOutput};
