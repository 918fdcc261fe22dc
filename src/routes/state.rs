use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    models::LotteryCatalog,
    services::{
        narrative::{ChatCompletionNarrator, NarrativeGenerator},
        Recommender,
    },
};

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(config: Config, recommender: Recommender) -> Self {
        Self {
            config,
            recommender,
        }
    }

    /// Wires the catalog and the optional narrative generator from configuration
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let catalog = LotteryCatalog::load(config.lottery_catalog_path.as_deref())?;

        let narrator: Option<Arc<dyn NarrativeGenerator>> = match config.narrative_key() {
            Some(key) => Some(Arc::new(ChatCompletionNarrator::new(
                key.to_string(),
                config.narrative_api_url.clone(),
                config.narrative_model.clone(),
            ))),
            None => None,
        };

        tracing::info!(
            lottery_types = catalog.len(),
            narrative = narrator.is_some(),
            "Application state initialized"
        );

        let recommender = Recommender::new(
            Arc::new(catalog),
            narrator,
            Duration::from_secs(config.narrative_timeout_secs),
        );

        Ok(Self::new(config, recommender))
    }
}
