use rand::Rng;
use std::{sync::Arc, time::Duration};

use crate::{
    error::AppResult,
    models::{LotteryCatalog, LotteryTypeConfig, NumberStatistic, RecommendationResult, Strategy},
    services::{
        engine::{self, Selection},
        narrative::{fallback_narrative, NarrativeGenerator, NarrativeRequest, StatisticsSummary},
    },
};

/// Generates recommendations for the games of a catalog
///
/// Wraps the strategy engine with lottery-type lookup and narrative text. The
/// narrative generator is optional; without one, or when it fails or exceeds
/// `narrative_timeout`, the deterministic fallback text is used.
pub struct Recommender {
    catalog: Arc<LotteryCatalog>,
    narrator: Option<Arc<dyn NarrativeGenerator>>,
    narrative_timeout: Duration,
}

impl Recommender {
    pub fn new(
        catalog: Arc<LotteryCatalog>,
        narrator: Option<Arc<dyn NarrativeGenerator>>,
        narrative_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            narrator,
            narrative_timeout,
        }
    }

    pub fn catalog(&self) -> &LotteryCatalog {
        &self.catalog
    }

    pub fn has_narrator(&self) -> bool {
        self.narrator.is_some()
    }

    /// Generates one recommendation.
    ///
    /// Fails only with `UnknownLotteryType`. `strategy_name` is normalized, so
    /// unrecognized names run the balanced strategy.
    pub async fn recommend<R: Rng + Send + ?Sized>(
        &self,
        lottery_type: &str,
        strategy_name: &str,
        statistics: &[NumberStatistic],
        rng: &mut R,
    ) -> AppResult<RecommendationResult> {
        let config = self.catalog.get(lottery_type)?;
        let strategy = Strategy::from_name(strategy_name);
        self.recommend_with(config, strategy, statistics, rng).await
    }

    /// Generates `count` recommendations sharing one generator
    pub async fn recommend_many<R: Rng + Send + ?Sized>(
        &self,
        lottery_type: &str,
        strategy_name: &str,
        statistics: &[NumberStatistic],
        count: usize,
        rng: &mut R,
    ) -> AppResult<Vec<RecommendationResult>> {
        let config = self.catalog.get(lottery_type)?;
        let strategy = Strategy::from_name(strategy_name);

        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            results.push(self.recommend_with(config, strategy, statistics, rng).await?);
        }
        Ok(results)
    }

    async fn recommend_with<R: Rng + Send + ?Sized>(
        &self,
        config: &LotteryTypeConfig,
        strategy: Strategy,
        statistics: &[NumberStatistic],
        rng: &mut R,
    ) -> AppResult<RecommendationResult> {
        let selection = engine::select(config, strategy, statistics, rng);
        let analysis = self
            .narrate(config, strategy, &selection, statistics)
            .await;

        Ok(RecommendationResult {
            lottery_type: config.key.clone(),
            strategy,
            numbers: selection.numbers,
            special_number: selection.special_number,
            confidence_score: selection.confidence_score,
            analysis,
            statistics_basis: selection.statistics_basis,
        })
    }

    async fn narrate(
        &self,
        config: &LotteryTypeConfig,
        strategy: Strategy,
        selection: &Selection,
        statistics: &[NumberStatistic],
    ) -> String {
        let fallback = || fallback_narrative(config, strategy, selection.numbers.len());

        let Some(narrator) = &self.narrator else {
            return fallback();
        };

        let request = NarrativeRequest {
            lottery_name: config.name.clone(),
            numbers: selection.numbers.clone(),
            special_number: selection.special_number,
            strategy,
            summary: StatisticsSummary::from_statistics(config, statistics),
        };

        match tokio::time::timeout(self.narrative_timeout, narrator.generate(&request)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = narrator.name(),
                    error = %e,
                    "Narrative generation failed, using fallback"
                );
                fallback()
            }
            Err(_) => {
                tracing::warn!(
                    provider = narrator.name(),
                    timeout_ms = self.narrative_timeout.as_millis() as u64,
                    "Narrative generation timed out, using fallback"
                );
                fallback()
            }
        }
    }
}
