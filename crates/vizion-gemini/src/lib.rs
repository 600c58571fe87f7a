// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter for Vizion.
//!
//! Uses the native `generateContent` API. Assistant turns are replayed from
//! the raw model `parts` stored as provider metadata, which keeps
//! `thoughtSignature` values intact across turns for thinking models.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use vizion_config::{VizionConfig, resolve_api_key};
use vizion_core::prompt::{DocumentFormat, SYSTEM_INSTRUCTION, render_user_turn};
use vizion_core::{
    Completion, ConversationEntry, GenerationRequest, ProviderAdapter, ProviderId,
    ProviderMetadata, Role, VizionError,
};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

const PARTS: &str = "parts";

/// Gemini provider implementing [`ProviderAdapter`].
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
}

impl GeminiProvider {
    /// Creates the provider. The key comes from `[gemini] api_key` or
    /// `GEMINI_API_KEY`.
    pub fn new(config: &VizionConfig) -> Result<Self, VizionError> {
        let section = &config.gemini;
        let api_key = resolve_api_key(&section.api_key, ProviderId::Gemini)
            .ok_or_else(|| VizionError::unconfigured(ProviderId::Gemini))?;

        let client = GeminiClient::new(
            &api_key,
            &section.base_url,
            Duration::from_secs(section.timeout_secs),
        )?;

        info!(model = section.default_model, "Gemini provider initialized");

        Ok(Self {
            client,
            model: section.default_model.clone(),
        })
    }

    fn to_request(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request.history.iter().map(history_content).collect();
        contents.push(Content::text(
            Some("user"),
            render_user_turn(
                DocumentFormat::LabeledSections,
                &request.document,
                &request.instruction,
            ),
        ));

        GenerateContentRequest {
            system_instruction: Content::text(None, SYSTEM_INSTRUCTION),
            contents,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".into(),
            }),
        }
    }
}

/// Converts a logged entry into a Gemini turn, preferring stored model parts.
fn history_content(entry: &ConversationEntry) -> Content {
    match entry.role {
        Role::User => Content::text(Some("user"), entry.content.as_str()),
        Role::Assistant => {
            let stored = entry
                .provider_metadata
                .as_ref()
                .and_then(|m| m.payload_for(ProviderId::Gemini))
                .and_then(|p| p.get(PARTS))
                .cloned()
                .map(serde_json::from_value::<Vec<Part>>);

            match stored {
                Some(Ok(parts)) if !parts.is_empty() => Content {
                    role: Some("model".into()),
                    parts,
                },
                Some(Err(e)) => {
                    warn!(entry = %entry.id, error = %e, "stored Gemini parts unreadable, replaying text");
                    Content::text(Some("model"), entry.content.as_str())
                }
                _ => Content::text(Some("model"), entry.content.as_str()),
            }
        }
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, VizionError> {
        let api_request = self.to_request(request);
        debug!(contents = api_request.contents.len(), "sending Gemini generateContent");

        let response = self.client.generate_content(&self.model, &api_request).await?;

        let Some(content) = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
        else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!("prompt blocked: {r}"))
                .unwrap_or_else(|| "response contained no candidates".to_string());
            return Err(VizionError::from_payload(ProviderId::Gemini, reason));
        };

        let text: String = content
            .parts
            .iter()
            .filter(|part| !part.is_thought())
            .filter_map(|part| part.text.as_deref())
            .collect();

        let provider_metadata = if content.parts.is_empty() {
            None
        } else {
            let parts = serde_json::to_value(&content.parts).map_err(|e| {
                VizionError::Internal(format!("failed to store Gemini parts: {e}"))
            })?;
            Some(ProviderMetadata::new(
                ProviderId::Gemini,
                serde_json::json!({ PARTS: parts }),
            ))
        };

        Ok(Completion {
            text,
            provider_metadata,
        })
    }
}
