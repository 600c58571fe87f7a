// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the DeepSeek chat completions API.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;
use vizion_core::{ProviderErrorKind, ProviderId, VizionError};

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

const PROVIDER: ProviderId = ProviderId::DeepSeek;

#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    client: reqwest::Client,
    endpoint: String,
}

impl DeepSeekClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, VizionError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| VizionError::Config(format!("invalid API key header value: {e}")))?,
        );
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

    /// Sends one non-streaming completion request.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, VizionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| VizionError::transport(PROVIDER, e.is_timeout(), e))?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        let body = response
            .text()
            .await
            .map_err(|e| VizionError::transport(PROVIDER, e.is_timeout(), e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => match api_err.error.type_ {
                    Some(type_) => format!("{type_}: {}", api_err.error.message),
                    None => api_err.error.message,
                },
                Err(_) => body,
            };
            return Err(VizionError::from_status(PROVIDER, status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| VizionError::Provider {
            provider: PROVIDER,
            kind: ProviderErrorKind::Api,
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
