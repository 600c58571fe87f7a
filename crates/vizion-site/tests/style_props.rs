// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for style application.

use proptest::prelude::*;
use strum::IntoEnumIterator;
use vizion_core::{FontFamily, HexColor, SourceDocument, StyleSettings};
use vizion_site::apply_style;

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(":root { --primary: #6366f1; --primary-dark: #4338ca; }".to_string()),
        Just(":root{--primary:var(--brand)}".to_string()),
        Just("body { font-family: Arial, sans-serif; margin: 0; }".to_string()),
        Just("html, body { font-family: 'Outfit' !important }".to_string()),
        Just("body { padding: 20px }".to_string()),
        Just("@media (max-width: 768px) { body { font-family: serif } .nav { display: none } }".to_string()),
        Just("/* body { font-family: x } */".to_string()),
        Just("a::after { content: \"}\"; }".to_string()),
        Just(".btn { background: var(--primary); }".to_string()),
        Just("h1 { font-family: Georgia; color: #111 }".to_string()),
        "[a-z]{1,6} \\{ [a-z-]{1,8}: [#a-z0-9 ]{0,10}; \\}",
    ]
}

fn stylesheet() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..8).prop_map(|parts| parts.join("\n"))
}

fn settings() -> impl Strategy<Value = StyleSettings> {
    let fonts: Vec<FontFamily> = FontFamily::iter().collect();
    (
        "#[0-9a-fA-F]{6}",
        prop::sample::select(fonts),
    )
        .prop_map(|(color, font_family)| StyleSettings {
            primary_color: color.parse::<HexColor>().unwrap(),
            font_family,
        })
}

proptest! {
    #[test]
    fn apply_style_is_idempotent(css in stylesheet(), style in settings()) {
        let doc = SourceDocument::new("<main></main>", css, "init();");
        let once = apply_style(&doc, &style);
        let twice = apply_style(&once, &style);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&once.html, &doc.html);
        prop_assert_eq!(&once.js, &doc.js);
    }

    #[test]
    fn apply_style_is_idempotent_on_noise(css in "[a-z{}:;#'\"/* \n!-]{0,80}", style in settings()) {
        let doc = SourceDocument::new("", css, "");
        let once = apply_style(&doc, &style);
        prop_assert_eq!(&apply_style(&once, &style), &once);
    }

    #[test]
    fn css_without_targets_is_unchanged(
        css in "[a-z.]{1,6} \\{ (color|margin|padding): [a-z0-9]{1,6}; \\}",
        style in settings(),
    ) {
        let doc = SourceDocument::new("<p/>", css, "");
        prop_assert_eq!(apply_style(&doc, &style), doc);
    }

    #[test]
    fn last_settings_win(css in stylesheet(), first in settings(), second in settings()) {
        let doc = SourceDocument::new("", css, "");
        let chained = apply_style(&apply_style(&doc, &first), &second);
        prop_assert_eq!(chained, apply_style(&doc, &second));
    }
}
