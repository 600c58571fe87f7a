// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation orchestrator: the control loop around one provider call.
//!
//! States: Idle -> Generating -> Idle. At most one generation is in flight.
//! The user entry is appended before the network call and the assistant entry
//! (or an error notice) after it, so every accepted submission grows the log
//! by exactly two entries. Locks are never held across the provider call.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use vizion_core::{
    ConversationEntry, GenerationRequest, NewEntry, ProviderId, SourceDocument, StyleSettings,
    VizionError,
};
use vizion_site::SiteSource;

use crate::conversation::ConversationLog;
use crate::registry::ProviderRegistry;

/// Assistant text used when the model returns no explanation.
pub const FALLBACK_EXPLANATION: &str = "I've updated the website based on your request!";

/// States in the orchestrator FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    /// Ready to accept a submission.
    Idle,
    /// A provider call is in flight.
    Generating,
}

impl std::fmt::Display for GenerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationState::Idle => write!(f, "idle"),
            GenerationState::Generating => write!(f, "generating"),
        }
    }
}

/// Why a request was refused without touching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyInstruction,
    Busy,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::EmptyInstruction => write!(f, "instruction is empty"),
            Rejection::Busy => write!(f, "a generation is already in progress"),
        }
    }
}

/// Result of [`GenerationOrchestrator::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Nothing was appended or changed.
    Rejected(Rejection),
    /// The document was replaced; `entry` is the assistant entry.
    Generated { entry: ConversationEntry },
    /// The document is unchanged; `entry` is the error notice.
    Failed {
        entry: ConversationEntry,
        error: VizionError,
    },
}

/// Marks a generation as in flight; clears the flag when dropped, including
/// when the owning future is dropped mid-call.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Log and document share one lock so a generation result lands in both at once.
#[derive(Debug, Default)]
struct Workspace {
    log: ConversationLog,
    site: SiteSource,
}

/// Owns the conversation log and the site source for one session.
pub struct GenerationOrchestrator {
    registry: ProviderRegistry,
    workspace: Mutex<Workspace>,
    generating: AtomicBool,
}

impl GenerationOrchestrator {
    /// Starts with an empty log and the placeholder document.
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry,
            workspace: Mutex::new(Workspace::default()),
            generating: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn state(&self) -> GenerationState {
        if self.generating.load(Ordering::Acquire) {
            GenerationState::Generating
        } else {
            GenerationState::Idle
        }
    }

    /// Runs one generation cycle for `instruction` against `provider`.
    pub async fn submit(&self, instruction: &str, provider: ProviderId) -> SubmitOutcome {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return SubmitOutcome::Rejected(Rejection::EmptyInstruction);
        }
        let Some(_in_flight) = InFlight::acquire(&self.generating) else {
            debug!(%provider, "submission rejected, generation in progress");
            return SubmitOutcome::Rejected(Rejection::Busy);
        };

        let (document, history) = {
            let mut workspace = self.workspace.lock().await;
            let document = workspace.site.current().clone();
            let history = workspace.log.snapshot();
            workspace.log.append(NewEntry::user(instruction));
            (document, history)
        };

        info!(%provider, history = history.len(), "generation started");

        let request = GenerationRequest {
            instruction: instruction.to_string(),
            document,
            history,
            provider,
        };
        let result = match self.registry.get(provider) {
            Ok(adapter) => adapter.generate(&request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => {
                let explanation = if response.explanation.trim().is_empty() {
                    FALLBACK_EXPLANATION.to_string()
                } else {
                    response.explanation
                };
                let entry = {
                    let mut workspace = self.workspace.lock().await;
                    workspace.site.replace(response.document);
                    workspace
                        .log
                        .append(NewEntry::assistant(explanation, response.provider_metadata))
                };
                info!(%provider, entry = %entry.id, "generation succeeded");
                SubmitOutcome::Generated { entry }
            }
            Err(error) => {
                warn!(%provider, error = %error, "generation failed");
                let entry = self
                    .workspace
                    .lock()
                    .await
                    .log
                    .append(NewEntry::error_notice(format!("Error: {}", error.user_message())));
                SubmitOutcome::Failed { entry, error }
            }
        }
    }

    /// Applies style settings to the current document. Allowed while a
    /// generation is in flight; a later successful generation replaces the
    /// patched document wholesale.
    pub async fn apply_style(&self, settings: &StyleSettings) -> bool {
        self.workspace.lock().await.site.apply_style(settings)
    }

    pub async fn current(&self) -> SourceDocument {
        self.workspace.lock().await.site.current().clone()
    }

    pub async fn history(&self) -> Vec<ConversationEntry> {
        self.workspace.lock().await.log.snapshot()
    }

    /// Clears the log and restores the placeholder document.
    pub async fn new_project(&self) -> Result<(), Rejection> {
        let Some(_in_flight) = InFlight::acquire(&self.generating) else {
            return Err(Rejection::Busy);
        };
        let mut workspace = self.workspace.lock().await;
        workspace.log.reset();
        workspace.site.reset();
        info!("started new project");
        Ok(())
    }
}
