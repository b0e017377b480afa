//! Multi-company comparison endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use edinet_core::ComparisonResult;
use serde::Deserialize;

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct CompareQuery {
    /// Comma-separated company codes, e.g. E02367,E01825 (2-10 codes)
    pub codes: String,
    /// Keep only the newest N fiscal periods per company
    pub years: Option<i64>,
}

pub fn compare_routes() -> Router<AppState> {
    Router::new().route("/compare", get(compare_companies))
}

#[utoipa::path(
    get,
    path = "/compare",
    params(CompareQuery),
    responses(
        (status = 200, description = "Per-company successes and failures in input order"),
        (status = 400, description = "Fewer than 2 or more than 10 codes")
    ),
    tag = "Compare"
)]
pub(crate) async fn compare_companies(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ApiResponse<ComparisonResult>>, AppError> {
    let codes: Vec<String> = query
        .codes
        .split(',')
        .map(|code| code.trim().to_string())
        .collect();

    let result = state.service.compare(&codes, query.years).await?;
    Ok(Json(ApiResponse::success(result)))
}
