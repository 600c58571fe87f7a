// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter chat completions request/response types.

use serde::{Deserialize, Serialize};

/// A request to `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// A message in the OpenAI-compatible chat format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user" or "assistant".
    pub role: String,

    /// Text content. May be null on responses.
    #[serde(default)]
    pub content: Option<String>,

    /// Structured reasoning blocks returned by reasoning models. Sent back
    /// unchanged on the following request to continue the reasoning chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_details: Option<serde_json::Value>,
}

impl ChatMessage {
    pub fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            reasoning_details: None,
        }
    }
}

/// Response body. OpenRouter may also deliver `error` with a 200 status.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error envelope: `{"error": {"message": "...", "code": 404}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_absent_reasoning() {
        let req = ChatRequest {
            model: "m".into(),
            messages: vec![ChatMessage::text("user", "hi")],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "m", "messages": [{"role": "user", "content": "hi"}]})
        );
    }

    #[test]
    fn response_with_null_content_and_reasoning() {
        let body = r#"{
            "id": "gen-1",
            "choices": [{
                "message": {"role": "assistant", "content": null, "reasoning_details": [{"type": "reasoning.text", "text": "t"}]},
                "finish_reason": "stop"
            }]
        }"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        let msg = &resp.choices[0].message;
        assert!(msg.content.is_none());
        assert!(msg.reasoning_details.as_ref().unwrap().is_array());
    }

    #[test]
    fn error_payload_with_ok_status() {
        let body = r#"{"error": {"message": "No endpoints found for model x", "code": 404}}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(resp.choices.is_empty());
        assert_eq!(resp.error.unwrap().code, Some(serde_json::json!(404)));
    }
}
