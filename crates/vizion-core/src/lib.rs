// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vizion chat-to-website builder.
//!
//! This crate provides the domain types (source document, conversation
//! entries, style settings), the error type, the [`ProviderAdapter`] trait
//! every LLM integration implements, the shared prompt contract and the
//! response parser.

pub mod error;
pub mod parse;
pub mod prompt;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ProviderErrorKind, VizionError};
pub use parse::{ParsedSite, parse_completion};
pub use traits::ProviderAdapter;
pub use types::{
    Completion, ConversationEntry, EntryId, FontFamily, GenerationRequest, HexColor, NewEntry,
    ProviderId, ProviderMetadata, ProviderResponse, Role, SourceDocument, StyleSettings,
};
