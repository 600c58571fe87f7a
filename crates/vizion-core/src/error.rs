// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vizion site builder.

use thiserror::Error;

use crate::types::ProviderId;

/// Classifies a provider failure so callers can react to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// No usable credentials for the selected provider.
    Unconfigured,
    /// The HTTP request could not be sent or the response could not be read.
    Transport,
    /// The transport timed out before the provider answered.
    Timeout,
    /// The provider answered with a non-success status.
    Status(u16),
    /// The provider returned an error payload or an unusable body.
    Api,
    /// The endpoint or model does not exist (HTTP 404 or equivalent).
    ModelUnavailable,
}

/// The primary error type used across the Vizion workspace.
#[derive(Debug, Error)]
pub enum VizionError {
    /// Configuration errors (invalid values, malformed headers).
    #[error("configuration error: {0}")]
    Config(String),

    /// LLM provider errors, classified by [`ProviderErrorKind`].
    #[error("provider error ({provider}): {message}")]
    Provider {
        provider: ProviderId,
        kind: ProviderErrorKind,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The model output did not contain a well-formed source triplet.
    #[error("parse error: {0}")]
    Parse(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VizionError {
    /// Builds a provider error without an underlying source.
    pub fn provider(provider: ProviderId, kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Builds the error returned when a provider has no credentials.
    pub fn unconfigured(provider: ProviderId) -> Self {
        Self::provider(
            provider,
            ProviderErrorKind::Unconfigured,
            format!(
                "{} is not configured. Set {} or add an api_key to the [{}] section of vizion.toml.",
                provider.display_name(),
                provider.api_key_env(),
                provider
            ),
        )
    }

    /// Wraps a transport failure. Timeouts get their own kind.
    pub fn transport(
        provider: ProviderId,
        timed_out: bool,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let (kind, message) = if timed_out {
            (ProviderErrorKind::Timeout, format!("request timed out: {err}"))
        } else {
            (ProviderErrorKind::Transport, format!("HTTP request failed: {err}"))
        };
        Self::Provider {
            provider,
            kind,
            message,
            source: Some(Box::new(err)),
        }
    }

    /// Classifies a non-success HTTP answer.
    ///
    /// 404 and error payloads reporting a missing model become
    /// [`ProviderErrorKind::ModelUnavailable`].
    pub fn from_status(provider: ProviderId, status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = if status == 404 || reports_missing_model(&message) {
            ProviderErrorKind::ModelUnavailable
        } else {
            ProviderErrorKind::Status(status)
        };
        Self::provider(provider, kind, format!("API returned {status}: {message}"))
    }

    /// Classifies an error payload delivered with a success status.
    pub fn from_payload(provider: ProviderId, message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = if reports_missing_model(&message) {
            ProviderErrorKind::ModelUnavailable
        } else {
            ProviderErrorKind::Api
        };
        Self::provider(provider, kind, message)
    }

    /// Returns the provider error kind, if this is a provider error.
    pub fn provider_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::Provider { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Renders the error as the text shown in the conversation log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider {
                provider,
                kind: ProviderErrorKind::ModelUnavailable,
                message,
                ..
            } => format!(
                "{} endpoint error. The selected model might be unavailable; try switching provider. ({message})",
                provider.display_name()
            ),
            Self::Provider {
                provider,
                kind: ProviderErrorKind::Timeout,
                ..
            } => format!("{} did not answer in time. Please try again.", provider.display_name()),
            Self::Provider { message, .. } => message.clone(),
            Self::Parse(_) => "AI response was not valid JSON. Please try again.".to_string(),
            Self::Config(message) | Self::Internal(message) => message.clone(),
        }
    }
}

/// Heuristic for "model not found" style error payloads.
fn reports_missing_model(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("model")
        && ["not found", "does not exist", "not exist", "unavailable", "no endpoints"]
            .iter()
            .any(|needle| lower.contains(needle))
}
