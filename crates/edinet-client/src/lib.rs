use std::time::Duration;

use async_trait::async_trait;
use edinet_core::{
    CompanyDataSource, CompanyDetail, CompanySummary, EdinetError, FinancialDocument,
    RankingResponse,
};
use reqwest::Client;
use serde_json::Value;

pub mod normalize;

const BASE_URL: &str = "https://edinetdb.jp/v1";

/// Every data request gets this fixed bound; a request either completes
/// within it or surfaces as a transport failure. No retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shorter bound for the unauthenticated liveness probe.
const STATUS_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway to the EDINET DB provider. One outbound call per method
/// invocation; the API key is injected at construction and attached to
/// every request.
#[derive(Clone)]
pub struct EdinetClient {
    api_key: String,
    client: Client,
}

impl EdinetClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { api_key, client }
    }

    /// Issue one authenticated GET and decode the JSON body.
    ///
    /// Status mapping: 404 means the identifier is unknown upstream,
    /// 401/403 means the credential was rejected (an operator problem,
    /// not a caller problem), anything else non-success is a transport
    /// failure carrying the upstream message.
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value, EdinetError> {
        let url = format!("{}/{}", BASE_URL, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| EdinetError::Transport(e.to_string()))?;

        let status = response.status();
        match status.as_u16() {
            404 => {
                return Err(EdinetError::NotFound(
                    "The company code is not registered with EDINET. Verify the code or look \
                     it up via company search."
                        .to_string(),
                ))
            }
            401 | 403 => {
                return Err(EdinetError::UpstreamAuth(format!(
                    "EDINET rejected the API key (HTTP {}). Check EDINET_API_KEY.",
                    status.as_u16()
                )))
            }
            _ => {}
        }

        if !status.is_success() {
            return Err(EdinetError::Transport(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| EdinetError::Transport(e.to_string()))
    }

    /// Search companies by name, or list them page by page when no query
    /// is given. Both document shapes go through the normalizer.
    pub async fn search_companies(
        &self,
        query: Option<&str>,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<CompanySummary>, EdinetError> {
        let doc = match query {
            // The search endpoint ignores paging; the listing endpoint
            // pages upstream.
            Some(q) => self.fetch("search", &[("q", q.to_string())]).await?,
            None => {
                self.fetch(
                    "companies",
                    &[
                        ("per_page", per_page.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?
            }
        };

        Ok(normalize::company_list(&doc))
    }

    /// Fetch the detail record for one company. Single-entity documents
    /// are passed through without reshaping.
    pub async fn company_detail(&self, code: &str) -> Result<CompanyDetail, EdinetError> {
        let doc = self.fetch(&format!("companies/{}", code), &[]).await?;
        serde_json::from_value(doc)
            .map_err(|e| EdinetError::Transport(format!("unexpected company document: {}", e)))
    }

    /// Fetch the full financial time series for one company, re-enveloped
    /// under the canonical `financials` key. Windowing is the caller's
    /// concern.
    pub async fn financials(&self, code: &str) -> Result<FinancialDocument, EdinetError> {
        let doc = self
            .fetch(&format!("companies/{}/financials", code), &[])
            .await?;
        serde_json::from_value(normalize::time_series(doc))
            .map_err(|e| EdinetError::Transport(format!("unexpected financials document: {}", e)))
    }

    /// Fetch a ranking by metric name. The document is decoded but never
    /// reshaped; upstream ordering is preserved.
    pub async fn ranking(
        &self,
        metric: &str,
        limit: u32,
        order: &str,
    ) -> Result<RankingResponse, EdinetError> {
        let doc = self
            .fetch(
                &format!("rankings/{}", metric),
                &[("limit", limit.to_string()), ("order", order.to_string())],
            )
            .await?;
        serde_json::from_value(doc)
            .map_err(|e| EdinetError::Transport(format!("unexpected ranking document: {}", e)))
    }

    /// Unauthenticated provider liveness probe. Returns the HTTP status
    /// and the decoded body when there is one.
    pub async fn service_status(&self) -> Result<(u16, Option<Value>), EdinetError> {
        let url = format!("{}/status", BASE_URL);
        let response = self
            .client
            .get(&url)
            .timeout(STATUS_PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| EdinetError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.json::<Value>().await.ok();
        Ok((status, body))
    }
}

#[async_trait]
impl CompanyDataSource for EdinetClient {
    async fn search_companies(
        &self,
        query: Option<&str>,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<CompanySummary>, EdinetError> {
        EdinetClient::search_companies(self, query, per_page, page).await
    }

    async fn company_detail(&self, code: &str) -> Result<CompanyDetail, EdinetError> {
        EdinetClient::company_detail(self, code).await
    }

    async fn financials(&self, code: &str) -> Result<FinancialDocument, EdinetError> {
        EdinetClient::financials(self, code).await
    }

    async fn ranking(
        &self,
        metric: &str,
        limit: u32,
        order: &str,
    ) -> Result<RankingResponse, EdinetError> {
        EdinetClient::ranking(self, metric, limit, order).await
    }
}
