//! Metric ranking endpoint.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use edinet_core::RankingResponse;
use serde::Deserialize;

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct RankingQuery {
    /// Rows to return (1-100)
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// asc or desc
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_limit() -> u32 {
    10
}

fn default_order() -> String {
    "desc".to_string()
}

pub fn ranking_routes() -> Router<AppState> {
    Router::new().route("/rankings/:metric", get(get_ranking))
}

#[utoipa::path(
    get,
    path = "/rankings/{metric}",
    params(
        ("metric" = String, Path, description = "roe, roa, sales, market_cap or operating_income"),
        RankingQuery
    ),
    responses(
        (status = 200, description = "Ranking rows in upstream order"),
        (status = 400, description = "Unknown metric or out-of-range parameters")
    ),
    tag = "Rankings"
)]
pub(crate) async fn get_ranking(
    State(state): State<AppState>,
    Path(metric): Path<String>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<ApiResponse<RankingResponse>>, AppError> {
    let ranking = state
        .service
        .ranking(&metric, query.limit, &query.order)
        .await?;
    Ok(Json(ApiResponse::success(ranking)))
}
