// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Website source management for Vizion.
//!
//! [`SiteSource`] owns the current HTML/CSS/JS triplet. Generated documents
//! replace it wholesale; style settings are applied through a structural CSS
//! patcher ([`css`]) that only rewrites existing declaration values. The
//! [`render`] module turns a document into preview and export pages.

pub mod css;
pub mod reconciler;
pub mod render;

pub use reconciler::{SiteSource, apply_style};
pub use render::{
    EXPORT_FILE_NAME, Viewport, code_view, copy_snippet, export_document, preview_document,
    preview_frame,
};
