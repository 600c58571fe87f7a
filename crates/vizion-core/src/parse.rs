// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of a source triplet from raw model output.
//!
//! Completions are expected to be a JSON object but often arrive wrapped in
//! prose, markdown fences or reasoning text. The parser takes the substring
//! from the first `{` to the last `}` and deserializes only that.

use serde::Deserialize;
use tracing::debug;

use crate::error::VizionError;
use crate::types::SourceDocument;

/// A parsed completion: the new document plus the model's explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSite {
    pub document: SourceDocument,
    pub explanation: String,
}

#[derive(Deserialize)]
struct SitePayload {
    html: String,
    css: String,
    #[serde(default)]
    js: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Returns the greedy brace-delimited candidate, if any.
pub fn json_candidate(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parses a raw completion into a [`ParsedSite`].
///
/// `js` and `explanation` default to empty strings; a JSON `null` for either
/// is treated the same way. Unknown fields are ignored.
pub fn parse_completion(raw: &str) -> Result<ParsedSite, VizionError> {
    let candidate = json_candidate(raw).ok_or_else(|| {
        VizionError::Parse("no JSON object found in model output".to_string())
    })?;

    let payload: SitePayload = serde_json::from_str(candidate).map_err(|e| {
        debug!(error = %e, len = candidate.len(), "completion candidate did not deserialize");
        VizionError::Parse(format!("model output is not a site object: {e}"))
    })?;

    Ok(ParsedSite {
        document: SourceDocument {
            html: payload.html,
            css: payload.css,
            js: payload.js.unwrap_or_default(),
        },
        explanation: payload.explanation.unwrap_or_default(),
    })
}
