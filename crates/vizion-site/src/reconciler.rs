// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The authoritative website source and local style application.

use tracing::debug;
use vizion_core::{SourceDocument, StyleSettings};

use crate::css;

/// Custom property carrying the site's primary color.
pub const PRIMARY_COLOR_PROPERTY: &str = "--primary";

/// Returns `document` with `settings` applied to its stylesheet.
///
/// Pure and idempotent: html and js are copied through, and CSS lacking the
/// targeted declarations comes back byte-for-byte unchanged.
pub fn apply_style(document: &SourceDocument, settings: &StyleSettings) -> SourceDocument {
    let css = css::set_hex_custom_property(
        &document.css,
        PRIMARY_COLOR_PROPERTY,
        settings.primary_color.as_str(),
    );
    let css = css::set_property_in_rules(
        &css,
        "body",
        "font-family",
        &body_font_value(settings),
    );

    SourceDocument {
        html: document.html.clone(),
        css,
        js: document.js.clone(),
    }
}

fn body_font_value(settings: &StyleSettings) -> String {
    format!("'{}', sans-serif", settings.font_family)
}

/// Owns the current [`SourceDocument`].
///
/// AI output enters only through [`SiteSource::replace`]; local edits only
/// through [`SiteSource::apply_style`].
#[derive(Debug, Clone, Default)]
pub struct SiteSource {
    document: SourceDocument,
}

impl SiteSource {
    /// Starts from the placeholder document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: SourceDocument) -> Self {
        Self { document }
    }

    /// Swaps in a freshly generated document wholesale.
    pub fn replace(&mut self, document: SourceDocument) {
        debug!(
            html_len = document.html.len(),
            css_len = document.css.len(),
            js_len = document.js.len(),
            "replacing site source"
        );
        self.document = document;
    }

    /// Patches the stylesheet in place. Returns whether anything changed.
    pub fn apply_style(&mut self, settings: &StyleSettings) -> bool {
        let patched = apply_style(&self.document, settings);
        let changed = patched.css != self.document.css;
        debug!(
            primary_color = %settings.primary_color,
            font_family = %settings.font_family,
            changed,
            "applied style settings"
        );
        self.document = patched;
        changed
    }

    pub fn current(&self) -> &SourceDocument {
        &self.document
    }

    /// Back to the placeholder document.
    pub fn reset(&mut self) {
        self.document = SourceDocument::placeholder();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use vizion_core::{FontFamily, HexColor};

    fn settings(color: &str, font: FontFamily) -> StyleSettings {
        StyleSettings {
            primary_color: HexColor::from_str(color).unwrap(),
            font_family: font,
        }
    }

    fn generated() -> SourceDocument {
        SourceDocument::new(
            "<header>Hi</header>",
            ":root { --primary: #6366f1; }\nbody { font-family: 'Inter', sans-serif; margin: 0; }",
            "console.log('x')",
        )
    }

    #[test]
    fn replace_is_wholesale() {
        let mut site = SiteSource::new();
        let g1 = SourceDocument::new("<p>one</p>", "p { color: red }", "a()");
        let g2 = SourceDocument::new("<p>two</p>", "p { color: blue }", "");
        site.replace(g1);
        site.replace(g2.clone());
        assert_eq!(site.current(), &g2);
    }

    #[test]
    fn apply_style_patches_color_and_font() {
        let mut site = SiteSource::with_document(generated());
        assert!(site.apply_style(&settings("#FF0000", FontFamily::Poppins)));
        assert_eq!(
            site.current().css,
            ":root { --primary: #ff0000; }\nbody { font-family: 'Poppins', sans-serif; margin: 0; }"
        );
        assert_eq!(site.current().html, "<header>Hi</header>");
        assert_eq!(site.current().js, "console.log('x')");
    }

    #[test]
    fn apply_style_twice_is_a_no_op() {
        let mut site = SiteSource::with_document(generated());
        let s = settings("#10b981", FontFamily::Outfit);
        site.apply_style(&s);
        let once = site.current().clone();
        assert!(!site.apply_style(&s));
        assert_eq!(site.current(), &once);
    }

    #[test]
    fn css_without_targets_is_untouched() {
        let doc = SourceDocument::new("<p/>", "h1 { color: #6366f1 } .card { padding: 4px }", "");
        let out = apply_style(&doc, &settings("#000000", FontFamily::Roboto));
        assert_eq!(out, doc);
    }

    #[test]
    fn placeholder_body_font_is_patched() {
        let mut site = SiteSource::new();
        site.apply_style(&settings("#6366f1", FontFamily::Roboto));
        assert_eq!(
            site.current().css,
            "body { font-family: 'Roboto', sans-serif; padding: 20px; } h1 { color: #6366f1; }"
        );
    }

    #[test]
    fn reset_restores_placeholder() {
        let mut site = SiteSource::with_document(generated());
        site.reset();
        assert_eq!(site.current(), &SourceDocument::placeholder());
    }
}
