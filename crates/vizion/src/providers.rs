// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the provider registry from configuration.
//!
//! A provider that cannot be constructed is recorded as unavailable with a
//! user-facing reason; the session still starts.

use std::sync::Arc;

use tracing::{debug, info, warn};
use vizion_agent::ProviderRegistry;
use vizion_config::VizionConfig;
use vizion_core::{ProviderAdapter, ProviderErrorKind, ProviderId, VizionError};

/// Constructs every compiled-in provider adapter.
pub fn build_registry(config: &VizionConfig) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    #[cfg(feature = "openrouter")]
    register(
        &mut registry,
        ProviderId::OpenRouter,
        vizion_openrouter::OpenRouterProvider::new(config),
    );
    #[cfg(not(feature = "openrouter"))]
    not_compiled(&mut registry, ProviderId::OpenRouter);

    #[cfg(feature = "deepseek")]
    register(
        &mut registry,
        ProviderId::DeepSeek,
        vizion_deepseek::DeepSeekProvider::new(config),
    );
    #[cfg(not(feature = "deepseek"))]
    not_compiled(&mut registry, ProviderId::DeepSeek);

    #[cfg(feature = "gemini")]
    register(
        &mut registry,
        ProviderId::Gemini,
        vizion_gemini::GeminiProvider::new(config),
    );
    #[cfg(not(feature = "gemini"))]
    not_compiled(&mut registry, ProviderId::Gemini);

    registry
}

#[allow(dead_code)]
fn register<P: ProviderAdapter>(
    registry: &mut ProviderRegistry,
    id: ProviderId,
    built: Result<P, VizionError>,
) {
    match built {
        Ok(provider) => {
            info!(provider = %id, model = provider.model(), "provider ready");
            registry.register(Arc::new(provider));
        }
        Err(e) => {
            if e.provider_kind() == Some(ProviderErrorKind::Unconfigured) {
                debug!(provider = %id, "no credentials, provider disabled");
            } else {
                warn!(provider = %id, error = %e, "provider initialization failed");
            }
            registry.mark_unavailable(id, e.user_message());
        }
    }
}

#[allow(dead_code)]
fn not_compiled(registry: &mut ProviderRegistry, id: ProviderId) {
    registry.mark_unavailable(
        id,
        format!("{} support was not compiled into this build.", id.display_name()),
    );
}

#[cfg(all(test, feature = "openrouter", feature = "deepseek", feature = "gemini"))]
mod tests {
    use super::*;
    use serial_test::serial;
    use vizion_agent::ProviderStatus;

    #[test]
    #[serial]
    fn only_providers_with_keys_are_ready() {
        unsafe {
            std::env::remove_var("OPENROUTER_API_KEY");
            std::env::remove_var("DEEPSEEK_API_KEY");
            std::env::remove_var("GEMINI_API_KEY");
        }
        let mut config = VizionConfig::default();
        config.deepseek.api_key = Some("sk-test".into());

        let registry = build_registry(&config);

        assert!(registry.is_ready(ProviderId::DeepSeek));
        assert!(!registry.is_ready(ProviderId::OpenRouter));
        let err = registry.get(ProviderId::Gemini).err().unwrap();
        assert!(err.user_message().contains("GEMINI_API_KEY"));

        let status = registry.status();
        assert_eq!(
            status[1].1,
            ProviderStatus::Ready {
                model: "deepseek-chat".into()
            }
        );
    }
}
