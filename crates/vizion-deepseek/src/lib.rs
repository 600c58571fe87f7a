// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DeepSeek provider adapter for Vizion.
//!
//! The current document travels as labeled `### HTML` / `### CSS` / `### JS`
//! sections. `reasoning_content` from `deepseek-reasoner` is kept as
//! provider metadata and replayed on the matching assistant turn.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use vizion_config::{VizionConfig, resolve_api_key};
use vizion_core::prompt::{DocumentFormat, SYSTEM_INSTRUCTION, render_user_turn};
use vizion_core::{
    Completion, GenerationRequest, ProviderAdapter, ProviderId, ProviderMetadata, Role,
    VizionError,
};

use crate::client::DeepSeekClient;
use crate::types::{ChatMessage, ChatRequest};

const REASONING_CONTENT: &str = "reasoning_content";

/// DeepSeek provider implementing [`ProviderAdapter`].
pub struct DeepSeekProvider {
    client: DeepSeekClient,
    model: String,
}

impl DeepSeekProvider {
    /// Creates the provider. The key comes from `[deepseek] api_key` or
    /// `DEEPSEEK_API_KEY`.
    pub fn new(config: &VizionConfig) -> Result<Self, VizionError> {
        let section = &config.deepseek;
        let api_key = resolve_api_key(&section.api_key, ProviderId::DeepSeek)
            .ok_or_else(|| VizionError::unconfigured(ProviderId::DeepSeek))?;

        let client = DeepSeekClient::new(
            &api_key,
            &section.base_url,
            Duration::from_secs(section.timeout_secs),
        )?;

        info!(model = section.default_model, "DeepSeek provider initialized");

        Ok(Self {
            client,
            model: section.default_model.clone(),
        })
    }

    fn to_chat_request(&self, request: &GenerationRequest) -> ChatRequest {
        let history = request.history.iter().map(|entry| match entry.role {
            Role::User => ChatMessage::text("user", entry.content.as_str()),
            Role::Assistant => ChatMessage {
                role: "assistant".into(),
                content: Some(entry.content.clone()),
                reasoning_content: entry
                    .provider_metadata
                    .as_ref()
                    .and_then(|m| m.payload_for(ProviderId::DeepSeek))
                    .and_then(|p| p.get(REASONING_CONTENT))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string),
            },
        });

        let messages = std::iter::once(ChatMessage::text("system", SYSTEM_INSTRUCTION))
            .chain(history)
            .chain(std::iter::once(ChatMessage::text(
                "user",
                render_user_turn(
                    DocumentFormat::LabeledSections,
                    &request.document,
                    &request.instruction,
                ),
            )))
            .collect();

        ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        }
    }
}

#[async_trait]
impl ProviderAdapter for DeepSeekProvider {
    fn id(&self) -> ProviderId {
        ProviderId::DeepSeek
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, VizionError> {
        let chat_request = self.to_chat_request(request);
        debug!(messages = chat_request.messages.len(), "sending DeepSeek completion");

        let response = self.client.chat(&chat_request).await?;
        let Some(choice) = response.choices.into_iter().next() else {
            return Err(VizionError::from_payload(
                ProviderId::DeepSeek,
                "response contained no choices",
            ));
        };

        let provider_metadata = choice
            .message
            .reasoning_content
            .filter(|r| !r.is_empty())
            .map(|reasoning| {
                ProviderMetadata::new(
                    ProviderId::DeepSeek,
                    serde_json::json!({ REASONING_CONTENT: reasoning }),
                )
            });

        Ok(Completion {
            text: choice.message.content.unwrap_or_default(),
            provider_metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serial_test::serial;
    use vizion_core::{ConversationEntry, EntryId, ProviderErrorKind, SourceDocument};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> VizionConfig {
        let mut config = VizionConfig::default();
        config.deepseek.api_key = Some("sk-ds-test".into());
        config.deepseek.base_url = base_url.to_string();
        config
    }

    fn assistant(id: u64, content: &str, meta: Option<ProviderMetadata>) -> ConversationEntry {
        ConversationEntry {
            id: EntryId(id),
            role: Role::Assistant,
            content: content.into(),
            provider_metadata: meta,
            is_error: false,
            created_at: Utc::now(),
        }
    }

    fn request(history: Vec<ConversationEntry>) -> GenerationRequest {
        GenerationRequest {
            instruction: "add a footer".into(),
            document: SourceDocument::new("<main></main>", "main{}", "go()"),
            history,
            provider: ProviderId::DeepSeek,
        }
    }

    #[test]
    #[serial]
    fn missing_key_is_unconfigured() {
        unsafe { std::env::remove_var("DEEPSEEK_API_KEY") };
        let err = DeepSeekProvider::new(&VizionConfig::default())
            .err()
            .expect("no key should fail");
        assert_eq!(err.provider_kind(), Some(ProviderErrorKind::Unconfigured));
        assert!(err.user_message().contains("DEEPSEEK_API_KEY"));
    }

    #[test]
    fn labeled_sections_and_reasoning_echo() {
        let provider = DeepSeekProvider::new(&config("http://localhost")).unwrap();
        let history = vec![
            assistant(
                2,
                "built it",
                Some(ProviderMetadata::new(
                    ProviderId::DeepSeek,
                    serde_json::json!({"reasoning_content": "let me think"}),
                )),
            ),
            assistant(
                4,
                "tweaked",
                Some(ProviderMetadata::new(
                    ProviderId::Gemini,
                    serde_json::json!({"parts": []}),
                )),
            ),
        ];

        let chat = provider.to_chat_request(&request(history));
        assert_eq!(chat.messages.len(), 4);
        assert_eq!(chat.messages[1].reasoning_content.as_deref(), Some("let me think"));
        assert!(chat.messages[2].reasoning_content.is_none());

        let last = chat.messages[3].content.as_deref().unwrap();
        assert!(last.contains("### HTML\n```html\n<main></main>\n```"));
        assert!(last.contains("### JS\n```js\ngo()\n```"));
        assert!(last.ends_with("User Request: add a footer"));
    }

    #[tokio::test]
    async fn generate_captures_reasoning_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "```json\n{\"html\":\"<footer>f</footer>\",\"css\":\"footer{}\"}\n```",
                        "reasoning_content": "The user wants a footer."
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = DeepSeekProvider::new(&config(&server.uri())).unwrap();
        let response = provider.generate(&request(vec![])).await.unwrap();

        assert_eq!(response.document, SourceDocument::new("<footer>f</footer>", "footer{}", ""));
        assert_eq!(response.explanation, "");
        let meta = response.provider_metadata.unwrap();
        assert_eq!(
            meta.payload_for(ProviderId::DeepSeek).unwrap()["reasoning_content"],
            "The user wants a footer."
        );
    }

    #[tokio::test]
    async fn not_found_maps_to_model_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let provider = DeepSeekProvider::new(&config(&server.uri())).unwrap();
        let err = provider.generate(&request(vec![])).await.unwrap_err();
        assert_eq!(err.provider_kind(), Some(ProviderErrorKind::ModelUnavailable));
        assert!(err.user_message().contains("try switching provider"));
    }
}
