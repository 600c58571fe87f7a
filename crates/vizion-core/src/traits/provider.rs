// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM provider integrations (OpenRouter, DeepSeek, Gemini).

use async_trait::async_trait;

use crate::error::VizionError;
use crate::parse::parse_completion;
use crate::types::{Completion, GenerationRequest, ProviderId, ProviderResponse};

/// Adapter for one LLM provider.
///
/// Implementors translate a [`GenerationRequest`] into the provider's wire
/// format and perform exactly one network call per invocation. They never
/// retry and never touch shared state.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + 'static {
    /// The registry key this adapter serves.
    fn id(&self) -> ProviderId;

    /// The model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Sends the request and returns the raw completion text and any
    /// continuation metadata.
    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, VizionError>;

    /// Runs [`complete`](Self::complete) and parses the result into a
    /// [`ProviderResponse`].
    async fn generate(&self, request: &GenerationRequest) -> Result<ProviderResponse, VizionError> {
        let completion = self.complete(request).await?;
        let parsed = parse_completion(&completion.text)?;
        Ok(ProviderResponse {
            document: parsed.document,
            explanation: parsed.explanation,
            provider_metadata: completion.provider_metadata,
        })
    }
}
