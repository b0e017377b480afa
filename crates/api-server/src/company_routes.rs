//! Company search, detail, financials and analysis endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use edinet_core::{AnalysisReport, CompanyDetail, CompanySummary, FinancialDocument};
use serde::Deserialize;

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Company-name keyword; omit to page through the full listing
    pub query: Option<String>,
    /// Rows per page (1-100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    10
}

fn default_page() -> u32 {
    1
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct YearsQuery {
    /// Keep only the newest N fiscal periods; omit for the full history
    pub years: Option<i64>,
}

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(search_companies))
        .route("/companies/:code", get(get_company))
        .route("/companies/:code/financials", get(get_financials))
        .route("/companies/:code/analysis", get(get_analysis))
}

#[utoipa::path(
    get,
    path = "/companies",
    params(SearchQuery),
    responses((status = 200, description = "Matching companies")),
    tag = "Companies"
)]
pub(crate) async fn search_companies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<CompanySummary>>>, AppError> {
    let companies = state
        .service
        .search_companies(query.query.as_deref(), query.per_page, query.page)
        .await?;
    Ok(Json(ApiResponse::success(companies)))
}

#[utoipa::path(
    get,
    path = "/companies/{code}",
    params(("code" = String, Path, description = "EDINET company code, e.g. E02367")),
    responses(
        (status = 200, description = "Company detail"),
        (status = 404, description = "Unknown company code")
    ),
    tag = "Companies"
)]
pub(crate) async fn get_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<CompanyDetail>>, AppError> {
    let detail = state.service.company_detail(&code).await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    get,
    path = "/companies/{code}/financials",
    params(
        ("code" = String, Path, description = "EDINET company code, e.g. E02367"),
        YearsQuery
    ),
    responses(
        (status = 200, description = "Financial time series, newest first"),
        (status = 404, description = "Unknown company code")
    ),
    tag = "Companies"
)]
pub(crate) async fn get_financials(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<YearsQuery>,
) -> Result<Json<ApiResponse<FinancialDocument>>, AppError> {
    let doc = state.service.financials(&code, query.years).await?;
    Ok(Json(ApiResponse::success(doc)))
}

#[utoipa::path(
    get,
    path = "/companies/{code}/analysis",
    params(
        ("code" = String, Path, description = "EDINET company code, e.g. E02367"),
        YearsQuery
    ),
    responses(
        (status = 200, description = "Financial-health summary of the newest period"),
        (status = 404, description = "Unknown code or no financial data")
    ),
    tag = "Companies"
)]
pub(crate) async fn get_analysis(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<YearsQuery>,
) -> Result<Json<ApiResponse<AnalysisReport>>, AppError> {
    let report = state.service.analysis(&code, query.years).await?;
    Ok(Json(ApiResponse::success(report)))
}
