// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter provider adapter for Vizion.
//!
//! Speaks the OpenAI-compatible chat completions API. The current document is
//! embedded as an inline JSON blob (`Current Code: {...}`) in the final user
//! message, and `reasoning_details` returned by reasoning models are replayed
//! on the assistant turn they belong to.

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

use crate::client::OpenRouterClient;
use crate::types::{ChatMessage, ChatRequest};

const REASONING_DETAILS: &str = "reasoning_details";

/// OpenRouter provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `OPENROUTER_API_KEY` env var -> error.
pub struct OpenRouterProvider {
    client: OpenRouterClient,
    model: String,
}

impl OpenRouterProvider {
    pub fn new(config: &VizionConfig) -> Result<Self, VizionError> {
        let section = &config.openrouter;
        let api_key = resolve_api_key(&section.api_key, ProviderId::OpenRouter)
            .ok_or_else(|| VizionError::unconfigured(ProviderId::OpenRouter))?;

        let client = OpenRouterClient::new(
            &api_key,
            &section.base_url,
            &section.app_title,
            section.referer.as_deref(),
            Duration::from_secs(section.timeout_secs),
        )?;

        info!(model = section.default_model, "OpenRouter provider initialized");

        Ok(Self {
            client,
            model: section.default_model.clone(),
        })
    }

    fn to_chat_request(&self, request: &GenerationRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(ChatMessage::text("system", SYSTEM_INSTRUCTION));

        for entry in &request.history {
            let message = match entry.role {
                Role::User => ChatMessage::text("user", entry.content.as_str()),
                Role::Assistant => ChatMessage {
                    role: "assistant".into(),
                    content: Some(entry.content.clone()),
                    reasoning_details: entry
                        .provider_metadata
                        .as_ref()
                        .and_then(|m| m.payload_for(ProviderId::OpenRouter))
                        .and_then(|p| p.get(REASONING_DETAILS))
                        .cloned(),
                },
            };
            messages.push(message);
        }

        messages.push(ChatMessage::text(
            "user",
            render_user_turn(
                DocumentFormat::InlineJson,
                &request.document,
                &request.instruction,
            ),
        ));

        ChatRequest {
            model: self.model.clone(),
            messages,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenRouterProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenRouter
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, VizionError> {
        let chat_request = self.to_chat_request(request);
        debug!(
            messages = chat_request.messages.len(),
            "sending OpenRouter completion"
        );
        let response = self.client.chat(&chat_request).await?;

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| {
                VizionError::from_payload(ProviderId::OpenRouter, "response contained no choices")
            })?;

        let provider_metadata = message.reasoning_details.map(|details| {
            ProviderMetadata::new(
                ProviderId::OpenRouter,
                serde_json::json!({ REASONING_DETAILS: details }),
            )
        });

        Ok(Completion {
            text: message.content.unwrap_or_default(),
            provider_metadata,
        })
    }
}
