//! Standalone HTML page wrapper
//!
//! Wraps a converted body in a self-contained page: charset, embedded
//! stylesheet, and a title block rendered from the document metadata (the
//! LaTeX title page the converter drops).

use mdthesis_model::ThesisMeta;

use crate::converter::convert;

/// Embedded stylesheet for the standalone page
const STYLESHEET: &str = "\
body { max-width: 46rem; margin: 2rem auto; padding: 0 1rem;
       font-family: Georgia, 'Times New Roman', serif; line-height: 1.6; }
header.title-block { text-align: center; margin: 4rem 0 3rem; }
header.title-block h1 { font-size: 1.9rem; margin-bottom: 0.5rem; }
header.title-block p { color: #444; margin: 0.2rem 0; }
h1 { border-bottom: 1px solid #ddd; padding-bottom: 0.3rem; margin-top: 2.5rem; }
img { max-width: 100%; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #bbb; padding: 0.3rem 0.7rem; }
th { background: #f3f3f3; }
pre { background: #f6f6f6; padding: 0.8rem; overflow-x: auto; }
code { font-family: 'D2Coding', 'Fira Mono', monospace; font-size: 0.92em; }
";

/// Render a complete standalone HTML page
pub fn render_page(meta: &ThesisMeta, markdown: &str) -> String {
    let body = convert(markdown);
    let title = escape(&meta.title);

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n");
    page.push_str(&format!("<html lang=\"{}\">\n", escape(&meta.lang)));
    page.push_str("<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str(&format!("<title>{}</title>\n", title));
    page.push_str(&format!("<style>\n{}</style>\n", STYLESHEET));
    page.push_str("</head>\n<body>\n");

    page.push_str("<header class=\"title-block\">\n");
    page.push_str(&format!("<h1>{}</h1>\n", title));
    if !meta.author.is_empty() {
        page.push_str(&format!("<p>{}</p>\n", escape(&meta.author)));
    }
    if !meta.date.is_empty() {
        page.push_str(&format!("<p>{}</p>\n", escape(&meta.date)));
    }
    page.push_str("</header>\n");

    page.push_str(&body);
    page.push_str("</body>\n</html>\n");
    page
}

/// Minimal escape for text placed in markup
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ThesisMeta {
        let mut meta = ThesisMeta::with_title("Forecasting PM2.5 & PM10");
        meta.author = "Jane Doe".to_string();
        meta.date = "2025-06-01".to_string();
        meta.lang = "en".to_string();
        meta
    }

    #[test]
    fn test_standalone_page_structure() {
        let page = render_page(&meta(), "# Intro\n\nBody.");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<html lang=\"en\">"));
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("<style>"));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn test_title_block_from_metadata() {
        let page = render_page(&meta(), "");
        assert!(page.contains("<title>Forecasting PM2.5 &amp; PM10</title>"));
        assert!(page.contains("<h1>Forecasting PM2.5 &amp; PM10</h1>"));
        assert!(page.contains("<p>Jane Doe</p>"));
        assert!(page.contains("<p>2025-06-01</p>"));
    }

    #[test]
    fn test_empty_author_and_date_omitted() {
        let mut m = meta();
        m.author.clear();
        m.date.clear();
        let page = render_page(&m, "");
        assert!(!page.contains("<p></p>"));
    }

    #[test]
    fn test_body_is_converted() {
        let page = render_page(&meta(), "The model **wins**.");
        assert!(page.contains("<strong>wins</strong>"));
    }
}
