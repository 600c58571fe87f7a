// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore};

use vizion_core::{Completion, GenerationRequest, ProviderAdapter, ProviderId, VizionError};

/// A mock LLM provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a valid
/// default site document is returned. Every request is recorded.
pub struct MockProvider {
    id: ProviderId,
    replies: Arc<Mutex<VecDeque<Result<Completion, VizionError>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockProvider {
    /// Create a mock provider with an empty reply queue.
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// Create a mock provider pre-loaded with raw completion texts.
    pub fn with_responses(id: ProviderId, responses: Vec<String>) -> Self {
        let provider = Self::new(id);
        let queue = responses
            .into_iter()
            .map(|text| {
                Ok(Completion {
                    text,
                    provider_metadata: None,
                })
            })
            .collect();
        Self {
            replies: Arc::new(Mutex::new(queue)),
            ..provider
        }
    }

    /// Blocks every call until `gate` has a permit available.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Add a raw completion text to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.add_reply(Ok(Completion {
            text: text.into(),
            provider_metadata: None,
        }))
        .await;
    }

    /// Add a full reply (completion with metadata, or an error).
    pub async fn add_reply(&self, reply: Result<Completion, VizionError>) {
        self.replies.lock().await.push_back(reply);
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self) -> Result<Completion, VizionError> {
        self.replies.lock().await.pop_front().unwrap_or_else(|| {
            Ok(Completion {
                text: site_json("<p>mock</p>", "p { color: #333; }", "", "mock response"),
                provider_metadata: None,
            })
        })
    }
}

/// Renders a completion body in the shape the system instruction asks for.
pub fn site_json(html: &str, css: &str, js: &str, explanation: &str) -> String {
    serde_json::json!({
        "html": html,
        "css": css,
        "js": js,
        "explanation": explanation,
    })
    .to_string()
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, VizionError> {
        self.requests.lock().await.push(request.clone());
        if let Some(gate) = &self.gate {
            let _permit = gate
                .acquire()
                .await
                .map_err(|e| VizionError::Internal(format!("mock gate closed: {e}")))?;
        }
        self.next_reply().await
    }
}
