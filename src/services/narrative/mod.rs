//! Narrative text for a recommendation
//!
//! A generator turns a selected number set into a short explanation. Generators
//! are optional: the recommender runs without one and uses [`fallback_narrative`],
//! which needs no network access and always yields the same text for the same
//! lottery, strategy and count.

use serde::Serialize;

use crate::{
    error::AppResult,
    models::{LotteryTypeConfig, NumberStatistic, Strategy},
    services::engine::StatisticsView,
};

pub mod chat_completion;

pub use chat_completion::ChatCompletionNarrator;

/// How many hot and cold numbers the prompt summary lists
const SUMMARY_SIZE: usize = 5;

/// Hottest and coldest numbers of a statistics snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub hot_numbers: Vec<u32>,
    pub cold_numbers: Vec<u32>,
}

impl StatisticsSummary {
    /// Summarizes the statistics that fall inside the lottery's universe
    pub fn from_statistics(config: &LotteryTypeConfig, statistics: &[NumberStatistic]) -> Self {
        let view = StatisticsView::new(config, statistics);

        let hot_numbers = view
            .ranked_by_frequency(true)
            .into_iter()
            .take(SUMMARY_SIZE)
            .collect();
        let cold_numbers = view
            .ranked_by_frequency(false)
            .into_iter()
            .take(SUMMARY_SIZE)
            .collect();

        Self {
            hot_numbers,
            cold_numbers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hot_numbers.is_empty() && self.cold_numbers.is_empty()
    }
}

/// Payload handed to a narrative generator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeRequest {
    pub lottery_name: String,
    /// Ascending
    pub numbers: Vec<u32>,
    pub special_number: Option<u32>,
    pub strategy: Strategy,
    pub summary: StatisticsSummary,
}

impl NarrativeRequest {
    /// Renders the request as a single user prompt
    pub fn to_prompt(&self) -> String {
        let special = self
            .special_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "none".to_string());
        let summary = if self.summary.is_empty() {
            "no historical statistics available".to_string()
        } else {
            format!(
                "hot numbers {:?}, cold numbers {:?}",
                self.summary.hot_numbers, self.summary.cold_numbers
            )
        };

        format!(
            "You are a lottery analyst. Give a short explanation (50-100 words) of the \
             recommended numbers below: why they were chosen and what characterizes them.\n\n\
             Lottery: {}\n\
             Numbers: {:?}\n\
             Special number: {}\n\
             Strategy: {}\n\
             Statistics summary: {}\n\n\
             Reply in Traditional Chinese.",
            self.lottery_name, self.numbers, special, self.strategy, summary
        )
    }
}

/// Source of narrative text
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Produces narrative text, or fails with the collaborator's error
    async fn generate(&self, request: &NarrativeRequest) -> AppResult<String>;

    /// Generator name for logging
    fn name(&self) -> &'static str;
}

/// Deterministic narrative used when no generator is configured or it fails
pub fn fallback_narrative(config: &LotteryTypeConfig, strategy: Strategy, count: usize) -> String {
    format!(
        "This recommendation uses the {}, selecting {} numbers from the draw history of {}. \
         Please play responsibly. Good luck!",
        strategy.display_name(),
        count,
        config.name
    )
}
