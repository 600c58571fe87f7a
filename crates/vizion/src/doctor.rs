// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vizion doctor` command implementation.
//!
//! Reports whether the configuration is valid and which providers have
//! credentials. With `--deep`, also checks that each configured provider's
//! endpoint is reachable.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use vizion_agent::{ProviderRegistry, ProviderStatus};
use vizion_config::VizionConfig;
use vizion_core::{ProviderId, VizionError};

use crate::providers::build_registry;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `vizion doctor` command.
pub async fn run_doctor(config: &VizionConfig, deep: bool, plain: bool) -> Result<(), VizionError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let registry = build_registry(config);

    let mut results = vec![check_config()];
    results.extend(check_providers(&registry));

    if deep {
        for (id, status) in registry.status() {
            if matches!(status, ProviderStatus::Ready { .. }) {
                results.push(check_reachable(id, base_url(config, id)).await);
            }
        }
    }

    println!();
    println!("  vizion doctor");
    println!("  {}", "-".repeat(50));

    for result in &results {
        println!("{}", render_line(result, use_color));
    }

    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
        if !deep {
            println!("  Run with --deep to check provider endpoints.");
        }
    } else {
        println!("  All checks passed.");
    }

    println!();

    Ok(())
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    use colored::Colorize;

    let duration_ms = result.duration.as_millis();
    if !use_color {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        return format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        );
    }

    let (symbol, message) = match result.status {
        CheckStatus::Pass => ("✓".green(), result.message.normal()),
        CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
        CheckStatus::Fail => ("✗".red(), result.message.red()),
    };
    format!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name)
}

/// Check configuration loads without errors.
fn check_config() -> CheckResult {
    let start = Instant::now();
    match vizion_config::load_and_validate() {
        Ok(_) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Pass,
            message: "valid".to_string(),
            duration: start.elapsed(),
        },
        Err(errors) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Fail,
            message: format!("{} error(s)", errors.len()),
            duration: start.elapsed(),
        },
    }
}

/// One check per provider: ready, or why it is not.
fn check_providers(registry: &ProviderRegistry) -> Vec<CheckResult> {
    registry
        .status()
        .into_iter()
        .map(|(id, status)| {
            let start = Instant::now();
            let (status, message) = match status {
                ProviderStatus::Ready { model } => (CheckStatus::Pass, format!("ready ({model})")),
                ProviderStatus::NotConfigured { reason } => (CheckStatus::Warn, reason),
            };
            CheckResult {
                name: id.display_name().to_string(),
                status,
                message,
                duration: start.elapsed(),
            }
        })
        .collect()
}

fn base_url(config: &VizionConfig, id: ProviderId) -> &str {
    match id {
        ProviderId::OpenRouter => &config.openrouter.base_url,
        ProviderId::DeepSeek => &config.deepseek.base_url,
        ProviderId::Gemini => &config.gemini.base_url,
    }
}

/// Deep check: the provider's base URL answers at all.
async fn check_reachable(id: ProviderId, url: &str) -> CheckResult {
    let start = Instant::now();
    let name = format!("{} endpoint", id.display_name());

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            return CheckResult {
                name,
                status: CheckStatus::Fail,
                message: format!("HTTP client error: {e}"),
                duration: start.elapsed(),
            };
        }
    };

    match client.head(url).send().await {
        Ok(_resp) => CheckResult {
            name,
            status: CheckStatus::Pass,
            message: "reachable".to_string(),
            duration: start.elapsed(),
        },
        Err(e) => {
            let message = if e.is_timeout() {
                "timeout (5s)".to_string()
            } else if e.is_connect() {
                "connection refused".to_string()
            } else {
                format!("error: {e}")
            };
            CheckResult {
                name,
                status: CheckStatus::Fail,
                message,
                duration: start.elapsed(),
            }
        }
    }
}
