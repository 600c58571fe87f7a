// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry: a pure lookup from [`ProviderId`] to adapter.
//!
//! Providers that could not be constructed (usually missing credentials) are
//! recorded with the reason, so selecting them fails with an `Unconfigured`
//! error instead of crashing the session.

use std::collections::HashMap;
use std::sync::Arc;

use strum::IntoEnumIterator;
use vizion_core::{ProviderAdapter, ProviderErrorKind, ProviderId, VizionError};

/// Availability of a provider in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    /// Adapter constructed and ready for requests.
    Ready { model: String },
    /// No adapter; the reason is shown to the user.
    NotConfigured { reason: String },
}

impl std::fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderStatus::Ready { model } => write!(f, "ready ({model})"),
            ProviderStatus::NotConfigured { .. } => write!(f, "not-configured"),
        }
    }
}

#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
    unavailable: HashMap<ProviderId, String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under its own id, replacing any previous entry.
    pub fn register(&mut self, provider: Arc<dyn ProviderAdapter>) {
        let id = provider.id();
        self.unavailable.remove(&id);
        self.providers.insert(id, provider);
    }

    /// Records why a provider could not be constructed.
    pub fn mark_unavailable(&mut self, id: ProviderId, reason: impl Into<String>) {
        self.providers.remove(&id);
        self.unavailable.insert(id, reason.into());
    }

    /// Looks up the adapter for `id`.
    pub fn get(&self, id: ProviderId) -> Result<Arc<dyn ProviderAdapter>, VizionError> {
        if let Some(provider) = self.providers.get(&id) {
            return Ok(Arc::clone(provider));
        }
        Err(match self.unavailable.get(&id) {
            Some(reason) => VizionError::provider(id, ProviderErrorKind::Unconfigured, reason.clone()),
            None => VizionError::unconfigured(id),
        })
    }

    pub fn is_ready(&self, id: ProviderId) -> bool {
        self.providers.contains_key(&id)
    }

    /// Status of every known provider, in declaration order.
    pub fn status(&self) -> Vec<(ProviderId, ProviderStatus)> {
        ProviderId::iter()
            .map(|id| {
                let status = match self.providers.get(&id) {
                    Some(p) => ProviderStatus::Ready {
                        model: p.model().to_string(),
                    },
                    None => ProviderStatus::NotConfigured {
                        reason: self
                            .unavailable
                            .get(&id)
                            .cloned()
                            .unwrap_or_else(|| VizionError::unconfigured(id).user_message()),
                    },
                };
                (id, status)
            })
            .collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("ready", &self.providers.keys().collect::<Vec<_>>())
            .field("unavailable", &self.unavailable)
            .finish()
    }
}
