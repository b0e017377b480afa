//! HTTP façade for the EDINET financial analysis service.
//!
//! Routing, validation mapping, CORS and the OpenAPI surface live here;
//! all decision logic sits behind `AnalysisService`.

use std::sync::Arc;

use analysis_service::AnalysisService;
use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use edinet_client::EdinetClient;
use edinet_core::EdinetError;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod company_routes;
pub mod compare_routes;
pub mod ranking_routes;
pub mod status_routes;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService<EdinetClient>>,
}

/// Uniform response envelope for data endpoints.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Domain error carried to the HTTP layer.
///
/// Validation is the caller's fault, NotFound is relayed as-is, an
/// upstream credential rejection is a service-availability condition
/// (operator misconfiguration), and everything else from the wire is a
/// bad-gateway condition.
pub struct AppError(pub EdinetError);

impl From<EdinetError> for AppError {
    fn from(err: EdinetError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EdinetError::Validation(_) => StatusCode::BAD_REQUEST,
            EdinetError::NotFound(_) => StatusCode::NOT_FOUND,
            EdinetError::UpstreamAuth(_) => StatusCode::SERVICE_UNAVAILABLE,
            EdinetError::Transport(_) => StatusCode::BAD_GATEWAY,
        };

        let message = self.0.to_string();
        if status.is_server_error() {
            tracing::error!("{}", message);
        }

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        status_routes::health,
        status_routes::api_status,
        company_routes::search_companies,
        company_routes::get_company,
        company_routes::get_financials,
        company_routes::get_analysis,
        ranking_routes::get_ranking,
        compare_routes::compare_companies,
    ),
    tags(
        (name = "Companies", description = "Company search, detail and financials"),
        (name = "Rankings", description = "Metric rankings"),
        (name = "Compare", description = "Multi-company comparison"),
        (name = "Status", description = "Service and upstream health"),
    )
)]
pub struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(status_routes::status_routes())
        .merge(company_routes::company_routes())
        .merge(ranking_routes::ranking_routes())
        .merge(compare_routes::compare_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    let api_key = std::env::var("EDINET_API_KEY")
        .context("EDINET_API_KEY is not set; configure the environment or .env")?;

    let state = AppState {
        service: Arc::new(AnalysisService::from_api_key(api_key)),
    };

    let addr =
        std::env::var("EDINET_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
