//! Single-pass markdown to HTML conversion
//!
//! Block structure is recognized line by line; inline markup is applied by
//! ordered regex substitution on already-escaped text. The ordering matters:
//! images before links (shared bracket syntax), bold before italic (shared
//! delimiter).

use std::fmt::Write;
use std::sync::OnceLock;

use regex::Regex;

/// Convert assembled thesis markdown to an HTML body fragment
pub fn convert(markdown: &str) -> String {
    let mut out = String::new();
    let lines: Vec<&str> = markdown.lines().collect();
    let mut i = 0;

    // YAML front matter is metadata, not content
    if lines.first().map(|l| l.trim()) == Some("---") {
        i = 1;
        while i < lines.len() && lines[i].trim() != "---" {
            i += 1;
        }
        i = (i + 1).min(lines.len());
    }

    let mut latex_depth = 0usize;
    let mut paragraph: Vec<String> = Vec::new();

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        // LaTeX environments (title page) are dropped; the page wrapper
        // renders the title block from metadata instead
        if let Some(rest) = trimmed.strip_prefix("\\begin{") {
            flush_paragraph(&mut out, &mut paragraph);
            log::debug!("dropping LaTeX environment: {}", rest.trim_end_matches('}'));
            latex_depth += 1;
            i += 1;
            continue;
        }
        if trimmed.starts_with("\\end{") {
            latex_depth = latex_depth.saturating_sub(1);
            i += 1;
            continue;
        }
        if latex_depth > 0 || trimmed.starts_with('\\') {
            i += 1;
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut out, &mut paragraph);
            i += 1;
            continue;
        }

        // Fenced code block
        if let Some(lang) = trimmed.strip_prefix("```") {
            flush_paragraph(&mut out, &mut paragraph);
            i += 1;
            let mut code = String::new();
            while i < lines.len() && !lines[i].trim().starts_with("```") {
                code.push_str(&escape_html(lines[i]));
                code.push('\n');
                i += 1;
            }
            i = (i + 1).min(lines.len());
            if lang.is_empty() {
                write!(out, "<pre><code>{}</code></pre>\n", code).unwrap();
            } else {
                write!(
                    out,
                    "<pre><code class=\"language-{}\">{}</code></pre>\n",
                    escape_html(lang.trim()),
                    code
                )
                .unwrap();
            }
            continue;
        }

        // ATX heading
        if let Some((level, text)) = parse_heading(trimmed) {
            flush_paragraph(&mut out, &mut paragraph);
            write!(out, "<h{}>{}</h{}>\n", level, inline(text), level).unwrap();
            i += 1;
            continue;
        }

        // Pipe table: header row followed by a delimiter row
        if trimmed.starts_with('|') && i + 1 < lines.len() && is_table_delimiter(lines[i + 1]) {
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str("<table>\n<thead>\n<tr>");
            for cell in split_table_row(trimmed) {
                write!(out, "<th>{}</th>", inline(&cell)).unwrap();
            }
            out.push_str("</tr>\n</thead>\n<tbody>\n");
            i += 2;
            while i < lines.len() && lines[i].trim().starts_with('|') {
                out.push_str("<tr>");
                for cell in split_table_row(lines[i].trim()) {
                    write!(out, "<td>{}</td>", inline(&cell)).unwrap();
                }
                out.push_str("</tr>\n");
                i += 1;
            }
            out.push_str("</tbody>\n</table>\n");
            continue;
        }

        // Flat lists
        if is_unordered_item(trimmed) {
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str("<ul>\n");
            while i < lines.len() && is_unordered_item(lines[i].trim()) {
                let item = &lines[i].trim()[2..];
                write!(out, "<li>{}</li>\n", inline(item)).unwrap();
                i += 1;
            }
            out.push_str("</ul>\n");
            continue;
        }
        if let Some(item) = parse_ordered_item(trimmed) {
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str("<ol>\n");
            write!(out, "<li>{}</li>\n", inline(item)).unwrap();
            i += 1;
            while i < lines.len() {
                match parse_ordered_item(lines[i].trim()) {
                    Some(item) => {
                        write!(out, "<li>{}</li>\n", inline(item)).unwrap();
                        i += 1;
                    }
                    None => break,
                }
            }
            out.push_str("</ol>\n");
            continue;
        }

        paragraph.push(trimmed.to_string());
        i += 1;
    }

    flush_paragraph(&mut out, &mut paragraph);
    out
}

/// Emit any accumulated paragraph lines as one `<p>`
fn flush_paragraph(out: &mut String, paragraph: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    let text = paragraph.join(" ");
    paragraph.clear();
    write!(out, "<p>{}</p>\n", inline(&text)).unwrap();
}

/// Parse an ATX heading: `#` through `######` followed by a space
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if (1..=6).contains(&hashes) {
        let rest = &line[hashes..];
        if let Some(text) = rest.strip_prefix(' ') {
            return Some((hashes, text.trim()));
        }
    }
    None
}

/// Whether a line is a table delimiter row (`| --- | --- |`)
fn is_table_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|')
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Split a pipe row into trimmed cells, honoring `\|` escapes
fn split_table_row(line: &str) -> Vec<String> {
    let inner = line
        .trim()
        .trim_start_matches('|')
        .trim_end_matches('|');
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// Whether a line is a flat unordered list item
fn is_unordered_item(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ")
}

/// The text of an ordered list item (`1. text`), if the line is one
fn parse_ordered_item(line: &str) -> Option<&str> {
    static ORDERED_RE: OnceLock<Regex> = OnceLock::new();
    let re = ORDERED_RE.get_or_init(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());
    re.captures(line)
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// Apply inline markup to escaped text
///
/// Order: images, links, bold, italic, inline code.
fn inline(text: &str) -> String {
    static IMAGE_RE: OnceLock<Regex> = OnceLock::new();
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    static BOLD_RE: OnceLock<Regex> = OnceLock::new();
    static ITALIC_RE: OnceLock<Regex> = OnceLock::new();
    static CODE_RE: OnceLock<Regex> = OnceLock::new();

    let image = IMAGE_RE
        .get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
    let link = LINK_RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
    let bold = BOLD_RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
    let italic = ITALIC_RE.get_or_init(|| Regex::new(r"\*([^*]+)\*").unwrap());
    let code = CODE_RE.get_or_init(|| Regex::new(r"`([^`]+)`").unwrap());

    let escaped = escape_html(text);
    let with_images = image.replace_all(&escaped, "<img src=\"$2\" alt=\"$1\">");
    let with_links = link.replace_all(&with_images, "<a href=\"$2\">$1</a>");
    let with_bold = bold.replace_all(&with_links, "<strong>$1</strong>");
    let with_italic = italic.replace_all(&with_bold, "<em>$1</em>");
    code.replace_all(&with_italic, "<code>$1</code>").into_owned()
}

/// Escape HTML metacharacters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(convert("# Title"), "<h1>Title</h1>\n");
        assert_eq!(convert("### Sub"), "<h3>Sub</h3>\n");
        // Seven hashes is not a heading
        assert!(convert("####### x").starts_with("<p>"));
    }

    #[test]
    fn test_paragraph_joining() {
        let html = convert("line one\nline two\n\nnext");
        assert_eq!(html, "<p>line one line two</p>\n<p>next</p>\n");
    }

    #[test]
    fn test_emphasis_and_code() {
        let html = convert("Both **bold** and *italic* plus `code`.");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_images_and_links() {
        let html = convert("![ACF plot](images/acf.png) and [source](https://example.com)");
        assert!(html.contains("<img src=\"images/acf.png\" alt=\"ACF plot\">"));
        assert!(html.contains("<a href=\"https://example.com\">source</a>"));
    }

    #[test]
    fn test_pipe_table() {
        let md = "| model | rmse |\n| --- | --- |\n| LSTM | 12.3 |\n";
        let html = convert(md);
        assert!(html.contains("<th>model</th>"));
        assert!(html.contains("<td>LSTM</td>"));
        assert!(html.contains("<td>12.3</td>"));
        assert!(html.contains("</tbody>\n</table>"));
    }

    #[test]
    fn test_escaped_pipe_in_cell() {
        let md = "| name |\n| --- |\n| a\\|b |\n";
        let html = convert(md);
        assert!(html.contains("<td>a|b</td>"));
    }

    #[test]
    fn test_lists() {
        let html = convert("- one\n- two\n\n1. first\n2. second");
        assert!(html.contains("<ul>\n<li>one</li>\n<li>two</li>\n</ul>"));
        assert!(html.contains("<ol>\n<li>first</li>\n<li>second</li>\n</ol>"));
    }

    #[test]
    fn test_fenced_code_is_escaped_verbatim() {
        let md = "```rust\nlet x = a < b && c > d;\n**not bold**\n```";
        let html = convert(md);
        assert!(html.contains("class=\"language-rust\""));
        assert!(html.contains("a &lt; b &amp;&amp; c &gt; d"));
        assert!(html.contains("**not bold**"));
    }

    #[test]
    fn test_front_matter_dropped() {
        let md = "---\ntitle: Test\ntoc: true\n---\n\n# Intro\n";
        let html = convert(md);
        assert!(!html.contains("toc"));
        assert!(html.contains("<h1>Intro</h1>"));
    }

    #[test]
    fn test_latex_environment_dropped() {
        let md = "\\begin{titlepage}\n\\begin{center}\nTitle text\n\\end{center}\n\\end{titlepage}\n\n\\newpage\n\nBody.";
        let html = convert(md);
        assert!(!html.contains("titlepage"));
        assert!(!html.contains("Title text"));
        assert!(!html.contains("newpage"));
        assert!(html.contains("<p>Body.</p>"));
    }

    #[test]
    fn test_escaping_in_paragraphs() {
        let html = convert("PM2.5 < PM10 & \"fine\"");
        assert!(html.contains("PM2.5 &lt; PM10 &amp; &quot;fine&quot;"));
    }
}
