//! Service info, health check and upstream reachability probe.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/api-status", get(api_status))
}

async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "EDINET financial analysis API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /companies": "Search companies",
            "GET /companies/{code}": "Company detail",
            "GET /companies/{code}/financials": "Financial time series",
            "GET /companies/{code}/analysis": "Financial-health analysis",
            "GET /rankings/{metric}": "Ranking by metric",
            "GET /compare": "Compare several companies"
        }
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is up")),
    tag = "Status"
)]
pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Serialize)]
pub struct ApiStatusReport {
    /// Upstream reachability: ok, http_NNN or error
    pub status: String,
    /// Whether a probe search succeeded with the configured key
    pub api_key_ok: Option<bool>,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edinet_status: Option<Value>,
    pub checked_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api-status",
    responses((status = 200, description = "Upstream reachability and API-key probe result")),
    tag = "Status"
)]
pub(crate) async fn api_status(State(state): State<AppState>) -> Json<ApiStatusReport> {
    let mut report = ApiStatusReport {
        status: "unknown".to_string(),
        api_key_ok: None,
        detail: String::new(),
        edinet_status: None,
        checked_at: Utc::now(),
    };

    match state.service.source().service_status().await {
        Ok((200, body)) => {
            report.status = "ok".to_string();
            report.edinet_status = body;
        }
        Ok((code, _)) => {
            report.status = format!("http_{}", code);
        }
        Err(e) => {
            report.status = "error".to_string();
            report.detail = e.to_string();
            return Json(report);
        }
    }

    // One authenticated probe search against a name guaranteed to exist.
    match state.service.search_companies(Some("トヨタ"), 1, 1).await {
        Ok(companies) => {
            report.api_key_ok = Some(!companies.is_empty());
            if companies.is_empty() && report.status == "ok" {
                report.detail =
                    "Probe search returned no rows; the API key may still be valid.".to_string();
            }
        }
        Err(e) => {
            report.api_key_ok = Some(false);
            report.detail = e.to_string();
        }
    }

    Json(report)
}
