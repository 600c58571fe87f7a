// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session core for the Vizion site builder.
//!
//! The [`GenerationOrchestrator`] coordinates one generation at a time:
//! - Looks up the selected adapter in the [`ProviderRegistry`]
//! - Records user and assistant turns in the [`ConversationLog`]
//! - Swaps the generated document into the site source
//! - Turns every failure into a single error entry

pub mod conversation;
pub mod orchestrator;
pub mod quick;
pub mod registry;

pub use conversation::ConversationLog;
pub use orchestrator::{
    FALLBACK_EXPLANATION, GenerationOrchestrator, GenerationState, Rejection, SubmitOutcome,
};
pub use quick::QuickComponent;
pub use registry::{ProviderRegistry, ProviderStatus};
