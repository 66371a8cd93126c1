//! mdthesis-render - External toolchain invocation
//!
//! Renders the assembled markdown to PDF or HTML by driving `pandoc`, with
//! `xelatex` as the PDF engine. The crate owns engine discovery, child
//! `PATH` augmentation for TeX Live installs, and error reporting that
//! surfaces the toolchain's own stderr.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use mdthesis_model::ThesisMeta;
//! use mdthesis_render::PandocRenderer;
//!
//! let renderer = PandocRenderer::new("pandoc");
//! let meta = ThesisMeta::with_title("My Thesis");
//! let report = renderer.render_pdf(
//!     Path::new("output/thesis.md"),
//!     Path::new("output/thesis.pdf"),
//!     &meta,
//! )?;
//! println!("{}", report.command);
//! # Ok::<(), mdthesis_render::RenderError>(())
//! ```

mod error;
mod pandoc;
mod toolchain;

pub use error::{RenderError, Result};
pub use pandoc::{PandocRenderer, RenderReport};
pub use toolchain::{child_path, discover_pdf_engine};
