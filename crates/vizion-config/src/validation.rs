// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as color syntax, supported font names, timeouts and URL schemes.

use std::str::FromStr;

use strum::IntoEnumIterator;
use vizion_core::{FontFamily, HexColor};

use crate::diagnostic::ConfigError;
use crate::model::VizionConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VizionConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Err(message) = HexColor::from_str(&config.style.primary_color) {
        errors.push(ConfigError::Validation {
            message: format!("style.primary_color: {message}"),
        });
    }

    if FontFamily::from_str(&config.style.font_family).is_err() {
        let valid = FontFamily::iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        errors.push(ConfigError::Validation {
            message: format!(
                "style.font_family `{}` is not supported (expected one of {valid})",
                config.style.font_family
            ),
        });
    }

    if config.app.export_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.export_path must not be empty".to_string(),
        });
    }

    let endpoints = [
        ("openrouter", &config.openrouter.base_url, config.openrouter.timeout_secs),
        ("deepseek", &config.deepseek.base_url, config.deepseek.timeout_secs),
        ("gemini", &config.gemini.base_url, config.gemini.timeout_secs),
    ];

    for (section, base_url, timeout_secs) in endpoints {
        let url = base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("{section}.base_url `{url}` must start with http:// or https://"),
            });
        }
        if timeout_secs == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{section}.timeout_secs must be greater than 0"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
