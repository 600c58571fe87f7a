// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Vizion.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vizion_core::{FontFamily, HexColor, ProviderId, StyleSettings};

/// Top-level Vizion configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VizionConfig {
    /// Application behavior settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Initial style settings applied at session start.
    #[serde(default)]
    pub style: StyleConfig,

    /// OpenRouter API settings.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// DeepSeek API settings.
    #[serde(default)]
    pub deepseek: DeepSeekConfig,

    /// Google Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

impl VizionConfig {
    /// Returns the configured style settings.
    ///
    /// Invalid values fall back to the defaults; [`crate::validation`] reports them.
    pub fn style_settings(&self) -> StyleSettings {
        let defaults = StyleSettings::default();
        StyleSettings {
            primary_color: HexColor::from_str(&self.style.primary_color)
                .unwrap_or(defaults.primary_color),
            font_family: FontFamily::from_str(&self.style.font_family)
                .unwrap_or(defaults.font_family),
        }
    }

    /// Returns a copy with every API key replaced by a placeholder.
    pub fn redacted(&self) -> Self {
        fn redact(key: &Option<String>) -> Option<String> {
            key.as_ref().map(|_| "********".to_string())
        }

        let mut copy = self.clone();
        copy.openrouter.api_key = redact(&self.openrouter.api_key);
        copy.deepseek.api_key = redact(&self.deepseek.api_key);
        copy.gemini.api_key = redact(&self.gemini.api_key);
        copy
    }
}

/// Application behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Provider selected when a session starts.
    #[serde(default = "default_provider")]
    pub default_provider: ProviderId,

    /// File written by the export command when no path is given.
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_provider: default_provider(),
            export_path: default_export_path(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider() -> ProviderId {
    ProviderId::OpenRouter
}

fn default_export_path() -> String {
    "website.html".to_string()
}

/// Initial style configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Primary color as a hex string.
    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    /// One of Inter, Outfit, Roboto, Poppins.
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            font_family: default_font_family(),
        }
    }
}

fn default_primary_color() -> String {
    "#6366f1".to_string()
}

fn default_font_family() -> String {
    "Inter".to_string()
}

/// OpenRouter API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterConfig {
    /// OpenRouter API key. `None` requires the `OPENROUTER_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for generation requests.
    #[serde(default = "default_openrouter_model")]
    pub default_model: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,

    /// Sent as `X-Title` for OpenRouter app attribution.
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Sent as `HTTP-Referer` when set.
    #[serde(default)]
    pub referer: Option<String>,

    /// Transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_openrouter_model(),
            base_url: default_openrouter_base_url(),
            app_title: default_app_title(),
            referer: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_openrouter_model() -> String {
    "google/gemini-2.0-flash-001".to_string()
}

fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_app_title() -> String {
    "Vizion AI".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// DeepSeek API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeepSeekConfig {
    /// DeepSeek API key. `None` requires the `DEEPSEEK_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for generation requests.
    #[serde(default = "default_deepseek_model")]
    pub default_model: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_deepseek_base_url")]
    pub base_url: String,

    /// Transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_deepseek_model(),
            base_url: default_deepseek_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_deepseek_model() -> String {
    "deepseek-chat".to_string()
}

fn default_deepseek_base_url() -> String {
    "https://api.deepseek.com".to_string()
}

/// Google Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` requires the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for generation requests.
    #[serde(default = "default_gemini_model")]
    pub default_model: String,

    /// Base URL of the Generative Language API.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Resolves an API key: a non-empty config value wins, then the provider's
/// environment variable. Returns `None` when neither is set.
pub fn resolve_api_key(config_key: &Option<String>, provider: ProviderId) -> Option<String> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Some(key.clone());
    }

    std::env::var(provider.api_key_env())
        .ok()
        .filter(|key| !key.trim().is_empty())
}
