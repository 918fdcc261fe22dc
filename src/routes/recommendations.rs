use axum::{extract::State, Extension, Json};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{NumberStatistic, RecommendationResult, Strategy},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub lottery_type: String,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
    /// Fixes the random source so the same request yields the same numbers
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub statistics: Vec<NumberStatistic>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub lottery_type: String,
    pub strategy: Strategy,
    pub credits_required: u32,
    pub recommendations: Vec<RecommendationResult>,
}

#[derive(Debug, Serialize)]
pub struct StrategyInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Lists the available strategies
pub async fn list_strategies() -> Json<Vec<StrategyInfo>> {
    let strategies = Strategy::ALL
        .iter()
        .map(|strategy| StrategyInfo {
            id: strategy.as_str(),
            name: strategy.display_name(),
            description: strategy.description(),
        })
        .collect();
    Json(strategies)
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let max = state.config.max_recommendations;
    let count = request.count.unwrap_or(1);
    if count == 0 || count > max {
        return Err(AppError::InvalidInput(format!(
            "count must be between 1 and {}",
            max
        )));
    }

    let credits_required = state
        .config
        .recommendation_cost
        .checked_mul(count)
        .ok_or_else(|| {
            AppError::InvalidInput(format!("credit cost of {} recommendations overflows", count))
        })?;

    let strategy_name = request.strategy.as_deref().unwrap_or(Strategy::Balanced.as_str());
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    tracing::info!(
        request_id = %request_id,
        lottery_type = %request.lottery_type,
        strategy = %strategy_name,
        count,
        statistics = request.statistics.len(),
        "Generating recommendations"
    );

    let recommendations = state
        .recommender
        .recommend_many(
            &request.lottery_type,
            strategy_name,
            &request.statistics,
            count as usize,
            &mut rng,
        )
        .await?;

    Ok(Json(RecommendationResponse {
        lottery_type: request.lottery_type,
        strategy: Strategy::from_name(strategy_name),
        credits_required,
        recommendations,
    }))
}
