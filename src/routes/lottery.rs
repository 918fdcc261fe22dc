use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{DrawRecord, LotteryTypeConfig, NumberStatistic},
    routes::AppState,
    services::{analysis, statistics},
};

#[derive(Debug, Serialize)]
pub struct LotteryTypeResponse {
    pub id: String,
    pub name: String,
    pub numbers_count: u32,
    pub max_number: u32,
    pub has_special: bool,
    pub special_max: Option<u32>,
}

impl From<&LotteryTypeConfig> for LotteryTypeResponse {
    fn from(config: &LotteryTypeConfig) -> Self {
        Self {
            id: config.key.clone(),
            name: config.name.clone(),
            numbers_count: config.numbers_count,
            max_number: config.max_number,
            has_special: config.has_special,
            special_max: config
                .has_special
                .then(|| config.special_upper_bound()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeriveStatisticsRequest {
    /// Newest first
    pub draws: Vec<DrawRecord>,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub lottery_type: String,
    pub total_draws: usize,
    pub statistics: Vec<NumberStatistic>,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub statistics: Vec<NumberStatistic>,
    #[serde(default)]
    pub total_draws: u32,
}

/// Lists the supported lottery types
pub async fn list_types(State(state): State<Arc<AppState>>) -> Json<Vec<LotteryTypeResponse>> {
    let types = state
        .recommender
        .catalog()
        .iter()
        .map(LotteryTypeResponse::from)
        .collect();
    Json(types)
}

/// Derives per-number statistics from a draw history
pub async fn derive_statistics(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(lottery_type): Path<String>,
    Json(request): Json<DeriveStatisticsRequest>,
) -> AppResult<Json<StatisticsResponse>> {
    let config = state.recommender.catalog().get(&lottery_type)?;
    let statistics = statistics::derive_statistics(config, &request.draws)?;

    tracing::info!(
        request_id = %request_id,
        lottery_type = %lottery_type,
        draws = request.draws.len(),
        "Derived statistics"
    );

    Ok(Json(StatisticsResponse {
        lottery_type,
        total_draws: request.draws.len(),
        statistics,
    }))
}

/// Hot, cold and overdue report for a statistics snapshot
pub async fn analysis(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(lottery_type): Path<String>,
    Json(request): Json<AnalysisRequest>,
) -> AppResult<Json<analysis::LotteryAnalysis>> {
    let config = state.recommender.catalog().get(&lottery_type)?;
    let report = analysis::analyze(config, &request.statistics, request.total_draws);

    tracing::info!(
        request_id = %request_id,
        lottery_type = %lottery_type,
        overdue = report.overdue_numbers.len(),
        "Analysis completed"
    );

    Ok(Json(report))
}
