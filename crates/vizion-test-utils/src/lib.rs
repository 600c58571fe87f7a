// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Vizion integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock LLM provider with pre-configured replies
//! - [`TestHarness`] - Orchestrator wired to a mock for every provider

pub mod harness;
pub mod mock_provider;

pub use harness::TestHarness;
pub use mock_provider::{MockProvider, site_json};
