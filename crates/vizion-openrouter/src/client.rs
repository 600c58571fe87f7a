// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenRouter chat completions API.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;
use vizion_core::{ProviderId, VizionError};

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

const PROVIDER: ProviderId = ProviderId::OpenRouter;

/// HTTP client for OpenRouter.
///
/// Sends exactly one request per call. Failures are classified but never
/// retried.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenRouterClient {
    /// Creates a client with the bearer key and attribution headers installed.
    pub fn new(
        api_key: &str,
        base_url: &str,
        app_title: &str,
        referer: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, VizionError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {api_key}"), "API key")?,
        );
        headers.insert("X-Title", header_value(app_title, "app title")?);
        if let Some(referer) = referer {
            headers.insert("HTTP-Referer", header_value(referer, "referer")?);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| VizionError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Sends a chat completion request.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, VizionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| VizionError::transport(PROVIDER, e.is_timeout(), e))?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "completion response received");

        let body = response
            .text()
            .await
            .map_err(|e| VizionError::transport(PROVIDER, e.is_timeout(), e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => api_err.error.message,
                Err(_) => body,
            };
            return Err(VizionError::from_status(PROVIDER, status.as_u16(), message));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| VizionError::Provider {
            provider: PROVIDER,
            kind: vizion_core::ProviderErrorKind::Api,
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })?;

        if let Some(error) = parsed.error {
            return Err(match error.code.as_ref().and_then(serde_json::Value::as_u64) {
                Some(404) => VizionError::from_status(PROVIDER, 404, error.message),
                _ => VizionError::from_payload(PROVIDER, error.message),
            });
        }
        Ok(parsed)
    }
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue, VizionError> {
    HeaderValue::from_str(value)
        .map_err(|e| VizionError::Config(format!("invalid {what} header value: {e}")))
}
