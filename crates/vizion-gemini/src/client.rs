// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;
use vizion_core::{ProviderErrorKind, ProviderId, VizionError};

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

const PROVIDER: ProviderId = ProviderId::Gemini;

/// Gemini API client. The key travels in the `x-goog-api-key` header.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, VizionError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
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
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Calls `models/{model}:generateContent` once.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, VizionError> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| VizionError::transport(PROVIDER, e.is_timeout(), e))?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        let body = response
            .text()
            .await
            .map_err(|e| VizionError::transport(PROVIDER, e.is_timeout(), e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(ApiErrorResponse { error }) => match error.status {
                    Some(code) => format!("{code}: {}", error.message),
                    None => error.message,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Content;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content::text(None, "sys"),
            contents: vec![Content::text(Some("user"), "Hello")],
            generation_config: None,
        }
    }

    #[tokio::test]
    async fn sends_key_header_to_model_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "AIza-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": "Hi"}]}, "finishReason": "STOP"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new("AIza-test", &server.uri(), Duration::from_secs(5)).unwrap();
        let resp = client
            .generate_content("gemini-2.0-flash", &test_request())
            .await
            .unwrap();
        let parts = &resp.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(parts[0].text.as_deref(), Some("Hi"));
    }

    #[tokio::test]
    async fn unknown_model_is_model_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {
                    "code": 404,
                    "message": "models/gemini-9 is not found for API version v1beta",
                    "status": "NOT_FOUND"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new("k", &server.uri(), Duration::from_secs(5)).unwrap();
        let err = client
            .generate_content("gemini-9", &test_request())
            .await
            .unwrap_err();
        assert_eq!(err.provider_kind(), Some(ProviderErrorKind::ModelUnavailable));
        assert!(err.to_string().contains("NOT_FOUND"), "got: {err}");
    }

    #[tokio::test]
    async fn quota_error_is_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new("k", &server.uri(), Duration::from_secs(5)).unwrap();
        let err = client
            .generate_content("gemini-2.0-flash", &test_request())
            .await
            .unwrap_err();
        assert_eq!(err.provider_kind(), Some(ProviderErrorKind::Status(429)));
    }
}
