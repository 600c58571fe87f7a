// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end orchestrator testing.
//!
//! `TestHarness` assembles a [`GenerationOrchestrator`] whose registry holds a
//! [`MockProvider`] for every provider id, and exposes the mocks so tests can
//! queue replies and inspect the requests they received.

use std::collections::HashMap;
use std::sync::Arc;

use strum::IntoEnumIterator;
use tokio::sync::Semaphore;
use vizion_agent::{GenerationOrchestrator, ProviderRegistry, SubmitOutcome};
use vizion_core::ProviderId;

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: HashMap<ProviderId, Vec<String>>,
    unconfigured: Vec<ProviderId>,
    gate: Option<Arc<Semaphore>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            unconfigured: Vec::new(),
            gate: None,
        }
    }

    /// Queue raw completion texts for one provider.
    pub fn with_mock_responses(mut self, provider: ProviderId, responses: Vec<String>) -> Self {
        self.responses.entry(provider).or_default().extend(responses);
        self
    }

    /// Leave `provider` out of the registry, as if it had no credentials.
    pub fn without_provider(mut self, provider: ProviderId) -> Self {
        self.unconfigured.push(provider);
        self
    }

    /// Make every mock wait on `gate` before answering.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn build(mut self) -> TestHarness {
        let mut registry = ProviderRegistry::new();
        let mut providers = HashMap::new();

        for id in ProviderId::iter() {
            if self.unconfigured.contains(&id) {
                registry.mark_unavailable(id, format!("{} is not configured.", id.display_name()));
                continue;
            }
            let mut mock = MockProvider::with_responses(id, self.responses.remove(&id).unwrap_or_default());
            if let Some(gate) = &self.gate {
                mock = mock.with_gate(Arc::clone(gate));
            }
            let mock = Arc::new(mock);
            registry.register(mock.clone());
            providers.insert(id, mock);
        }

        TestHarness {
            orchestrator: Arc::new(GenerationOrchestrator::new(registry)),
            providers,
        }
    }
}

/// A complete session stack backed by mock providers.
pub struct TestHarness {
    pub orchestrator: Arc<GenerationOrchestrator>,
    providers: HashMap<ProviderId, Arc<MockProvider>>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// The mock registered for `id`, if it was not left unconfigured.
    pub fn provider(&self, id: ProviderId) -> Option<Arc<MockProvider>> {
        self.providers.get(&id).cloned()
    }

    /// Submits `instruction` to the default provider (OpenRouter).
    pub async fn submit(&self, instruction: &str) -> SubmitOutcome {
        self.orchestrator.submit(instruction, ProviderId::OpenRouter).await
    }
}
