// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./vizion.toml` > `~/.config/vizion/vizion.toml` > `/etc/vizion/vizion.toml`
//! with environment variable overrides via `VIZION_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VizionConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/vizion/vizion.toml` (system-wide)
/// 3. `~/.config/vizion/vizion.toml` (user XDG config)
/// 4. `./vizion.toml` (local directory)
/// 5. `VIZION_*` environment variables
pub fn load_config() -> Result<VizionConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<VizionConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VizionConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VizionConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VizionConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(VizionConfig::default()))
        .merge(Toml::file("/etc/vizion/vizion.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("vizion/vizion.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("vizion.toml"))
        .merge(env_provider())
}

/// Config sections that environment variables can target.
const ENV_SECTIONS: &[&str] = &["app", "style", "openrouter", "deepseek", "gemini"];

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `VIZION_OPENROUTER_API_KEY` must map to `openrouter.api_key`,
/// not `openrouter.api.key`. Only the leading section name is split off, so
/// `VIZION_OPENROUTER_APP_TITLE` maps to `openrouter.app_title`.
fn env_provider() -> Env {
    Env::prefixed("VIZION_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a prefix-stripped env var name to a dotted config path.
fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
