// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the provider adapters, the site reconciler and the
//! generation orchestrator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Identifies an LLM provider in the registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenRouter,
    DeepSeek,
    Gemini,
}

impl ProviderId {
    /// Human-readable provider name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenRouter => "OpenRouter",
            ProviderId::DeepSeek => "DeepSeek",
            ProviderId::Gemini => "Gemini",
        }
    }

    /// Environment variable consulted when the config carries no API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderId::OpenRouter => "OPENROUTER_API_KEY",
            ProviderId::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderId::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// The authoritative website representation.
///
/// `html` is body-level markup only; the page skeleton is added by the
/// preview and export renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl SourceDocument {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// The placeholder document every session starts with.
    pub fn placeholder() -> Self {
        Self::new(
            "<h1>Welcome to your new website</h1><p>Start by asking the AI to build something for you.</p>",
            "body { font-family: sans-serif; padding: 20px; } h1 { color: #6366f1; }",
            "",
        )
    }
}

impl Default for SourceDocument {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Who authored a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Creation-ordered identifier of a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Provider-specific continuation data attached to an assistant turn.
///
/// The payload is opaque to everything except the adapter named by
/// `provider`, which replays it verbatim on its next request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub provider: ProviderId,
    pub payload: serde_json::Value,
}

impl ProviderMetadata {
    pub fn new(provider: ProviderId, payload: serde_json::Value) -> Self {
        Self { provider, payload }
    }

    /// Returns the payload only when it was produced by `provider`.
    pub fn payload_for(&self, provider: ProviderId) -> Option<&serde_json::Value> {
        (self.provider == provider).then_some(&self.payload)
    }
}

/// One turn in the dialogue. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: EntryId,
    pub role: Role,
    pub content: String,
    pub provider_metadata: Option<ProviderMetadata>,
    /// Set on assistant entries that report a failed generation.
    pub is_error: bool,
    pub created_at: DateTime<Utc>,
}

/// An entry that has not been appended yet; the log assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub role: Role,
    pub content: String,
    pub provider_metadata: Option<ProviderMetadata>,
    pub is_error: bool,
}

impl NewEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            provider_metadata: None,
            is_error: false,
        }
    }

    pub fn assistant(content: impl Into<String>, provider_metadata: Option<ProviderMetadata>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            provider_metadata,
            is_error: false,
        }
    }

    pub fn error_notice(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            provider_metadata: None,
            is_error: true,
        }
    }
}

/// A validated hex color such as `#6366f1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`.
    pub fn is_hex_color(value: &str) -> bool {
        match value.strip_prefix('#') {
            Some(digits) => {
                matches!(digits.len(), 3 | 4 | 6 | 8)
                    && digits.chars().all(|c| c.is_ascii_hexdigit())
            }
            None => false,
        }
    }
}

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if Self::is_hex_color(trimmed) {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            Err(format!("`{trimmed}` is not a hex color (expected #rgb or #rrggbb)"))
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of fonts offered by the style controls.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum FontFamily {
    #[default]
    Inter,
    Outfit,
    Roboto,
    Poppins,
}

/// User-controlled presentation overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSettings {
    pub primary_color: HexColor,
    pub font_family: FontFamily,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            primary_color: HexColor("#6366f1".to_string()),
            font_family: FontFamily::Inter,
        }
    }
}

/// Everything an adapter needs for one generation cycle.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub instruction: String,
    pub document: SourceDocument,
    /// Committed log as of the end of the previous cycle.
    pub history: Vec<ConversationEntry>,
    pub provider: ProviderId,
}

/// Raw model output from a single provider call, before parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub provider_metadata: Option<ProviderMetadata>,
}

/// The canonical result of a successful generation cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub document: SourceDocument,
    pub explanation: String,
    pub provider_metadata: Option<ProviderMetadata>,
}
