// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The output contract sent to every provider and the serializations of the
//! current document that adapters embed in the final user turn.

use crate::types::SourceDocument;

/// System instruction describing the JSON object the model must return.
pub const SYSTEM_INSTRUCTION: &str = r#"You are a web developer. Generate website code in JSON format.
{
  "html": "body content",
  "css": "css styles",
  "js": "scripts",
  "explanation": "overview"
}
The html value is body-level markup only, without <html>, <head> or <body> tags.
You receive the current code with every request. Edit it incrementally and return the complete html, css and js, not just the changed parts.
ONLY return the JSON object."#;

/// How the current document is embedded in the final user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `Current Code: {"html":..,"css":..,"js":..}`
    InlineJson,
    /// Markdown headings with fenced HTML, CSS and JS sections.
    LabeledSections,
}

/// Renders the final user turn: the full current document, then the instruction.
pub fn render_user_turn(format: DocumentFormat, document: &SourceDocument, instruction: &str) -> String {
    match format {
        DocumentFormat::InlineJson => {
            // Serializing three plain strings cannot fail.
            let code = serde_json::to_string(document).unwrap_or_else(|_| "None".to_string());
            format!("Current Code: {code}\n\nUser Request: {instruction}")
        }
        DocumentFormat::LabeledSections => format!(
            "Current website source:\n\n### HTML\n```html\n{}\n```\n\n### CSS\n```css\n{}\n```\n\n### JS\n```js\n{}\n```\n\nUser Request: {instruction}",
            document.html, document.css, document.js
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> SourceDocument {
        SourceDocument::new("<p>x</p>", "p{color:blue}", "console.log(1)")
    }

    #[test]
    fn inline_json_carries_full_triplet() {
        let turn = render_user_turn(DocumentFormat::InlineJson, &doc(), "make it red");
        assert_eq!(
            turn,
            r#"Current Code: {"html":"<p>x</p>","css":"p{color:blue}","js":"console.log(1)"}

User Request: make it red"#
        );
    }

    #[test]
    fn labeled_sections_end_with_instruction() {
        let turn = render_user_turn(DocumentFormat::LabeledSections, &doc(), "add a footer");
        let html = turn.find("### HTML").unwrap();
        let css = turn.find("### CSS").unwrap();
        let js = turn.find("### JS").unwrap();
        assert!(html < css && css < js);
        assert!(turn.contains("console.log(1)"));
        assert!(turn.ends_with("User Request: add a footer"));
    }

    #[test]
    fn empty_js_still_gets_a_section() {
        let mut d = doc();
        d.js.clear();
        let turn = render_user_turn(DocumentFormat::LabeledSections, &d, "x");
        assert!(turn.contains("### JS\n```js\n\n```"));
    }
}
