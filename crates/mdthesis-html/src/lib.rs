//! mdthesis-html - Builtin markdown to HTML formatter
//!
//! A bounded, single-pass, regex-driven formatter used when pandoc is not
//! available (or explicitly requested). It understands exactly the markdown
//! the assembler emits: ATX headings, pipe tables, flat lists, fenced code,
//! images, links, and emphasis. YAML front matter and LaTeX environments
//! are consumed, with the title page re-rendered from metadata.
//!
//! This is a formatter, not a parser engine: no nesting, no recursion, no
//! blockquotes.
//!
//! # Example
//!
//! ```
//! use mdthesis_html::convert;
//!
//! let html = convert("# Results\n\nThe model **wins**.");
//! assert!(html.contains("<h1>Results</h1>"));
//! assert!(html.contains("<strong>wins</strong>"));
//! ```

mod converter;
mod page;

pub use converter::convert;
pub use page::render_page;
