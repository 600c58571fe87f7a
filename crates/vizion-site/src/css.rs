// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A small structural CSS scanner and declaration patcher.
//!
//! The scanner finds rule blocks (recursing into at-rule bodies such as
//! `@media`) and the declarations inside them, skipping comments and quoted
//! strings. Patches rewrite individual declaration values by byte range, so
//! text outside the targeted values is never touched. When no declaration
//! matches, the input is returned unchanged.

use std::ops::Range;

/// A style rule: selector prelude and the body between its braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: Range<usize>,
    pub body: Range<usize>,
}

/// A `property: value` pair inside a rule body. Both ranges are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: Range<usize>,
    pub value: Range<usize>,
}

/// Returns every style rule in `css`, including rules nested in at-rules.
/// Unterminated blocks are ignored.
pub fn rules(css: &str) -> Vec<Rule> {
    let mut out = Vec::new();
    collect_rules(css.as_bytes(), 0..css.len(), &mut out);
    out
}

fn collect_rules(bytes: &[u8], range: Range<usize>, out: &mut Vec<Rule>) {
    let mut i = range.start;
    let mut prelude_start = range.start;

    while i < range.end {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let comment_start = i;
                i = skip_comment(bytes, i, range.end);
                if is_blank(bytes, prelude_start..comment_start) {
                    prelude_start = i;
                }
            }
            b'"' | b'\'' => i = skip_string(bytes, i, range.end),
            b'{' => {
                let Some(close) = matching_brace(bytes, i, range.end) else {
                    return;
                };
                let selector = prelude_start..i;
                let body = i + 1..close;
                if bytes[trim(bytes, selector.clone())].first() == Some(&b'@') {
                    collect_rules(bytes, body, out);
                } else {
                    out.push(Rule { selector, body });
                }
                i = close + 1;
                prelude_start = i;
            }
            b'}' | b';' => {
                i += 1;
                prelude_start = i;
            }
            _ => i += 1,
        }
    }
}

/// Returns the declarations directly inside `body`. Nested blocks are skipped.
pub fn declarations(css: &str, body: Range<usize>) -> Vec<Declaration> {
    let bytes = css.as_bytes();
    let mut out = Vec::new();
    let mut i = body.start;
    let mut start = body.start;

    while i < body.end {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let comment_start = i;
                i = skip_comment(bytes, i, body.end);
                if is_blank(bytes, start..comment_start) {
                    start = i;
                }
            }
            b'"' | b'\'' => i = skip_string(bytes, i, body.end),
            b'{' => {
                i = matching_brace(bytes, i, body.end).map_or(body.end, |close| close + 1);
                start = i;
            }
            b';' => {
                out.extend(split_declaration(bytes, start..i));
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    out.extend(split_declaration(bytes, start..body.end));
    out
}

fn split_declaration(bytes: &[u8], range: Range<usize>) -> Option<Declaration> {
    let mut i = range.start;
    while i < range.end {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_comment(bytes, i, range.end),
            b'"' | b'\'' => i = skip_string(bytes, i, range.end),
            b':' => {
                let property = trim(bytes, range.start..i);
                if property.is_empty() {
                    return None;
                }
                return Some(Declaration {
                    property,
                    value: trim(bytes, i + 1..range.end),
                });
            }
            _ => i += 1,
        }
    }
    None
}

fn skip_comment(bytes: &[u8], open: usize, end: usize) -> usize {
    let mut i = open + 2;
    while i + 1 < end {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    end
}

fn skip_string(bytes: &[u8], open: usize, end: usize) -> usize {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < end {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    end
}

fn matching_brace(bytes: &[u8], open: usize, end: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < end {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_comment(bytes, i, end),
            b'"' | b'\'' => i = skip_string(bytes, i, end),
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

fn trim(bytes: &[u8], range: Range<usize>) -> Range<usize> {
    let mut start = range.start;
    let mut end = range.end;
    while start < end && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    start..end
}

fn is_blank(bytes: &[u8], range: Range<usize>) -> bool {
    bytes[range].iter().all(u8::is_ascii_whitespace)
}

/// Narrows a value range so a trailing `!important` is preserved.
fn replaceable_value(css: &str, value: Range<usize>) -> Range<usize> {
    let text = &css[value.clone()];
    let lower = text.to_ascii_lowercase();
    if let Some(pos) = lower.rfind("!important")
        && lower[pos..].trim_end() == "!important"
    {
        let head = text[..pos].trim_end();
        return value.start..value.start + head.len();
    }
    value
}

/// Returns true when any comma-separated part of the selector is exactly `name`.
/// Comments inside the selector are ignored.
fn selector_matches(selector: &str, name: &str) -> bool {
    strip_comments(selector)
        .split(',')
        .any(|part| part.trim().eq_ignore_ascii_case(name))
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        out.push(' ');
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

fn apply_edits(css: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.retain(|(range, replacement)| css[range.clone()] != *replacement);
    if edits.is_empty() {
        return css.to_string();
    }

    edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
    let mut out = css.to_string();
    for (range, replacement) in edits {
        out.replace_range(range, &replacement);
    }
    out
}

/// Sets every `name` custom property whose current value is a hex color.
///
/// Declarations holding other values (`var(...)`, keywords) are left alone.
pub fn set_hex_custom_property(css: &str, name: &str, color: &str) -> String {
    let edits = rules(css)
        .into_iter()
        .flat_map(|rule| declarations(css, rule.body))
        .filter(|decl| &css[decl.property.clone()] == name)
        .filter_map(|decl| {
            let value = replaceable_value(css, decl.value);
            vizion_core::HexColor::is_hex_color(&css[value.clone()])
                .then(|| (value, color.to_string()))
        })
        .collect();
    apply_edits(css, edits)
}

/// Sets `property` in every rule whose selector list contains `selector`.
///
/// Rules lacking the property are not modified; nothing is inserted.
pub fn set_property_in_rules(css: &str, selector: &str, property: &str, value: &str) -> String {
    let edits = rules(css)
        .into_iter()
        .filter(|rule| selector_matches(&css[rule.selector.clone()], selector))
        .flat_map(|rule| declarations(css, rule.body))
        .filter(|decl| css[decl.property.clone()].eq_ignore_ascii_case(property))
        .map(|decl| (replaceable_value(css, decl.value), value.to_string()))
        .collect();
    apply_edits(css, edits)
}
