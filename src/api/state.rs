use std::sync::Arc;

use crate::config::Config;
use crate::services::{AssemblySettings, MetadataProvider, TmdbProvider};

/// Shared application state.
///
/// Read-only after startup: every request runs its own pipeline and nothing
/// is shared between requests except the provider's HTTP client.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no TMDB credential is configured
    pub provider: Option<Arc<dyn MetadataProvider>>,
    pub settings: AssemblySettings,
}

impl AppState {
    /// Builds state from configuration, wiring TMDB when a key is present
    pub fn from_config(config: &Config) -> Self {
        let provider = config.tmdb_api_key.clone().map(|key| {
            Arc::new(TmdbProvider::new(key, config.tmdb_api_url.clone()))
                as Arc<dyn MetadataProvider>
        });

        if provider.is_none() {
            tracing::warn!("TMDB_API_KEY is not set; recommendation requests will fail");
        }

        Self {
            provider,
            settings: AssemblySettings::from(config),
        }
    }

    /// Creates state around an explicit provider
    pub fn with_provider(
        provider: Option<Arc<dyn MetadataProvider>>,
        settings: AssemblySettings,
    ) -> Self {
        Self { provider, settings }
    }
}
