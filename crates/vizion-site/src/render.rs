// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure renderers over a [`SourceDocument`]: preview page, standalone
//! export, code listing and clipboard snippet.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};
use vizion_core::SourceDocument;

/// Default file name for exported sites.
pub const EXPORT_FILE_NAME: &str = "website.html";

/// `<title>` of exported sites.
pub const EXPORT_TITLE: &str = "My Generated Website";

/// Font links shared by preview and export. Covers every selectable font.
pub const FONT_PREAMBLE: &str = concat!(
    r#"<link rel="preconnect" href="https://fonts.googleapis.com">"#,
    "\n",
    r#"<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>"#,
    "\n",
    r#"<link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700;800&family=Outfit:wght@400;500;600;700;800&family=Poppins:wght@400;500;600;700;800&family=Roboto:wght@400;500;700&display=swap" rel="stylesheet">"#,
);

/// Preview frame sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Viewport {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Viewport {
    /// Frame `(width, height)` in CSS pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Viewport::Desktop => (1440, 900),
            Viewport::Tablet => (768, 1024),
            Viewport::Mobile => (375, 667),
        }
    }
}

/// Preview page: markup, stylesheet and fonts. Scripts are not included.
pub fn preview_document(doc: &SourceDocument) -> String {
    format!(
        "<html>\n<head>\n{FONT_PREAMBLE}\n<style>{css}</style>\n</head>\n<body>{html}</body>\n</html>\n",
        css = doc.css,
        html = doc.html,
    )
}

/// Preview page embedded in a frame sized for `viewport`.
pub fn preview_frame(doc: &SourceDocument, viewport: Viewport) -> String {
    let (width, height) = viewport.dimensions();
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"UTF-8\">\n",
            "<title>Preview ({viewport})</title>\n",
            "<style>body {{ margin: 0; background: #0f172a; display: flex; justify-content: center; padding: 24px; }} ",
            "iframe {{ border: 0; background: #fff; border-radius: 12px; }}</style>\n",
            "</head>\n",
            "<body>\n",
            "<iframe width=\"{width}\" height=\"{height}\" sandbox=\"allow-same-origin\" srcdoc=\"{srcdoc}\"></iframe>\n",
            "</body>\n",
            "</html>\n",
        ),
        viewport = viewport,
        width = width,
        height = height,
        srcdoc = escape_attribute(&preview_document(doc)),
    )
}

/// Standalone page: head with meta tags, fonts and inline style; body with
/// the markup followed by the inline script.
pub fn export_document(doc: &SourceDocument) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "    <meta charset=\"UTF-8\">\n",
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
            "    <title>{title}</title>\n",
            "{fonts}\n",
            "    <style>{css}</style>\n",
            "</head>\n",
            "<body>\n",
            "    {html}\n",
            "    <script>{js}</script>\n",
            "</body>\n",
            "</html>\n",
        ),
        title = EXPORT_TITLE,
        fonts = indent(FONT_PREAMBLE, "    "),
        css = doc.css,
        html = doc.html,
        js = doc.js,
    )
}

/// Labelled listing of the three sources.
pub fn code_view(doc: &SourceDocument) -> String {
    let mut out = format!("// index.html\n{}\n\n// styles.css\n{}\n", doc.html, doc.css);
    if !doc.js.trim().is_empty() {
        out.push_str(&format!("\n// script.js\n{}\n", doc.js));
    }
    out
}

/// Markup followed by the stylesheet in a `<style>` block.
pub fn copy_snippet(doc: &SourceDocument) -> String {
    format!("{}\n\n<style>\n{}\n</style>", doc.html, doc.css)
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> SourceDocument {
        SourceDocument::new("<h1>A</h1>", "h1{color:red}", "console.log(1)")
    }

    #[test]
    fn export_orders_style_markup_script() {
        let out = export_document(&doc());

        let head_end = out.find("</head>").unwrap();
        let style = out.find("<style>h1{color:red}</style>").unwrap();
        let body = out.find("<body>").unwrap();
        let markup = out.find("<h1>A</h1>").unwrap();
        let script = out.find("<script>console.log(1)</script>").unwrap();
        let body_end = out.find("</body>").unwrap();

        assert!(style < head_end);
        assert!(head_end < body && body < markup);
        assert!(markup < script && script < body_end);
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("<title>My Generated Website</title>"));
        assert!(out.contains("name=\"viewport\""));
        assert!(out.contains("fonts.googleapis.com"));
    }

    #[test]
    fn preview_omits_script() {
        let out = preview_document(&doc());
        assert!(out.contains("<style>h1{color:red}</style>"));
        assert!(out.contains("<body><h1>A</h1></body>"));
        assert!(!out.contains("<script"));
        assert!(!out.contains("console.log"));
    }

    #[test]
    fn preview_frame_uses_viewport_size() {
        let out = preview_frame(&doc(), Viewport::Mobile);
        assert!(out.contains("width=\"375\" height=\"667\""));
        assert!(out.contains("&lt;h1&gt;A&lt;/h1&gt;"));
        assert!(!out.contains("srcdoc=\"<html>"));
    }

    #[test]
    fn viewport_presets() {
        assert_eq!(Viewport::Desktop.dimensions(), (1440, 900));
        assert_eq!(Viewport::Tablet.dimensions(), (768, 1024));
        assert_eq!("MOBILE".parse::<Viewport>().unwrap(), Viewport::Mobile);
    }

    #[test]
    fn code_view_labels_sources() {
        let out = code_view(&doc());
        assert!(out.starts_with("// index.html\n<h1>A</h1>"));
        assert!(out.contains("// styles.css\nh1{color:red}"));
        assert!(out.contains("// script.js\nconsole.log(1)"));

        let no_js = code_view(&SourceDocument::new("<p/>", "p{}", ""));
        assert!(!no_js.contains("script.js"));
    }

    #[test]
    fn copy_snippet_format() {
        assert_eq!(copy_snippet(&doc()), "<h1>A</h1>\n\n<style>\nh1{color:red}\n</style>");
    }
}
