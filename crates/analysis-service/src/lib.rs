//! Façade-facing operations shared by the HTTP API and the CLI.
//!
//! Input validation happens here, before any upstream call. The
//! multi-company comparison is the one place errors are recovered
//! locally: a lane failure becomes a failure record instead of aborting
//! the batch.

use edinet_core::{
    window, AnalysisReport, CompanyDataSource, CompanyDetail, CompanySummary, ComparisonFailure,
    ComparisonResult, ComparisonSuccess, EdinetError, FinancialDocument, RankingResponse,
};
use edinet_client::EdinetClient;

/// Metric names the ranking endpoint accepts. Anything else is rejected
/// without touching the provider.
pub const VALID_METRICS: [&str; 5] = ["roe", "roa", "sales", "market_cap", "operating_income"];

const MIN_COMPARE_CODES: usize = 2;
const MAX_COMPARE_CODES: usize = 10;

pub struct AnalysisService<C: CompanyDataSource> {
    source: C,
}

impl AnalysisService<EdinetClient> {
    /// Service wired to the live EDINET gateway.
    pub fn from_api_key(api_key: String) -> Self {
        Self::new(EdinetClient::new(api_key))
    }
}

impl<C: CompanyDataSource> AnalysisService<C> {
    pub fn new(source: C) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// Search companies by name, or page through the full listing when no
    /// query is given. The search endpoint ignores paging upstream, so the
    /// normalized result is truncated to `per_page` locally in that branch.
    pub async fn search_companies(
        &self,
        query: Option<&str>,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<CompanySummary>, EdinetError> {
        if !(1..=100).contains(&per_page) {
            return Err(EdinetError::Validation(
                "per_page must be between 1 and 100".to_string(),
            ));
        }
        if page < 1 {
            return Err(EdinetError::Validation(
                "page must be at least 1".to_string(),
            ));
        }

        let mut companies = self.source.search_companies(query, per_page, page).await?;
        if query.is_some() {
            companies.truncate(per_page as usize);
        }
        Ok(companies)
    }

    pub async fn company_detail(&self, code: &str) -> Result<CompanyDetail, EdinetError> {
        self.source.company_detail(code).await
    }

    /// Financial time series for one company, windowed to the newest
    /// `years` periods in place. Sibling document fields are untouched.
    pub async fn financials(
        &self,
        code: &str,
        years: Option<i64>,
    ) -> Result<FinancialDocument, EdinetError> {
        let mut doc = self.source.financials(code).await?;
        doc.financials = window(doc.financials, years);
        Ok(doc)
    }

    pub async fn ranking(
        &self,
        metric: &str,
        limit: u32,
        order: &str,
    ) -> Result<RankingResponse, EdinetError> {
        if !VALID_METRICS.contains(&metric) {
            return Err(EdinetError::Validation(format!(
                "Invalid metric. Valid options: {}",
                VALID_METRICS.join(", ")
            )));
        }
        if !(1..=100).contains(&limit) {
            return Err(EdinetError::Validation(
                "limit must be between 1 and 100".to_string(),
            ));
        }
        if order != "asc" && order != "desc" {
            return Err(EdinetError::Validation(
                "order must be either asc or desc".to_string(),
            ));
        }

        self.source.ranking(metric, limit, order).await
    }

    /// Compare 2-10 companies.
    ///
    /// Lanes run concurrently (the code-count ceiling bounds the fan-out);
    /// within a lane the detail fetch precedes the financials fetch. A
    /// lane failure is demoted to a failure record without cancelling
    /// sibling lanes, and both partitions are rebuilt in input order after
    /// every lane has completed. Duplicate codes are processed
    /// independently.
    pub async fn compare(
        &self,
        codes: &[String],
        years: Option<i64>,
    ) -> Result<ComparisonResult, EdinetError> {
        if codes.len() < MIN_COMPARE_CODES {
            return Err(EdinetError::Validation(
                "At least 2 company codes are required".to_string(),
            ));
        }
        if codes.len() > MAX_COMPARE_CODES {
            return Err(EdinetError::Validation(
                "Maximum 10 companies can be compared at once".to_string(),
            ));
        }

        let lanes: Vec<_> = codes
            .iter()
            .map(|code| {
                let code = code.clone();
                async move {
                    match self.fetch_comparison_lane(&code, years).await {
                        Ok(success) => Ok(success),
                        Err(e) => {
                            tracing::warn!("comparison fetch failed for {}: {}", code, e);
                            Err(ComparisonFailure {
                                code,
                                error: e.to_string(),
                            })
                        }
                    }
                }
            })
            .collect();

        let mut result = ComparisonResult::default();
        for lane in futures::future::join_all(lanes).await {
            match lane {
                Ok(success) => result.successes.push(success),
                Err(failure) => result.failures.push(failure),
            }
        }
        Ok(result)
    }

    async fn fetch_comparison_lane(
        &self,
        code: &str,
        years: Option<i64>,
    ) -> Result<ComparisonSuccess, EdinetError> {
        let info = self.source.company_detail(code).await?;
        let financials = self.financials(code, years).await?;
        Ok(ComparisonSuccess {
            code: code.to_string(),
            name: info.name.clone(),
            info,
            financials,
        })
    }

    /// Financial-health summary from the newest windowed period.
    pub async fn analysis(
        &self,
        code: &str,
        years: Option<i64>,
    ) -> Result<AnalysisReport, EdinetError> {
        let info = self.source.company_detail(code).await?;
        let doc = self.financials(code, years).await?;

        let Some(latest) = doc.financials.first() else {
            return Err(EdinetError::NotFound(
                "No financial data available".to_string(),
            ));
        };

        Ok(AnalysisReport::from_latest(code, &info, latest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use edinet_core::{FinancialPeriod, Rating};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub source: codes starting with "BAD" fail, codes starting with
    /// "EMPTY" have no financial history, everything else resolves.
    #[derive(Default)]
    struct StubSource {
        calls: AtomicUsize,
    }

    impl StubSource {
        fn upstream_calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn periods() -> Vec<FinancialPeriod> {
            (0..5)
                .map(|i| FinancialPeriod {
                    fiscal_period: Some(format!("FY{}", 2024 - i)),
                    roe: Some(16.0),
                    roa: Some(1.5),
                    ..Default::default()
                })
                .collect()
        }
    }

    #[async_trait]
    impl CompanyDataSource for StubSource {
        async fn search_companies(
            &self,
            _query: Option<&str>,
            _per_page: u32,
            _page: u32,
        ) -> Result<Vec<CompanySummary>, EdinetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..30)
                .map(|i| CompanySummary {
                    edinet_code: format!("E{:05}", i),
                    name: format!("Company {}", i),
                    securities_code: String::new(),
                    industry: String::new(),
                })
                .collect())
        }

        async fn company_detail(&self, code: &str) -> Result<CompanyDetail, EdinetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if code.starts_with("BAD") {
                return Err(EdinetError::NotFound(format!("unknown code {}", code)));
            }
            Ok(CompanyDetail {
                edinet_code: Some(code.to_string()),
                name: Some(format!("{} Inc.", code)),
                ..Default::default()
            })
        }

        async fn financials(&self, code: &str) -> Result<FinancialDocument, EdinetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if code.starts_with("BAD") {
                return Err(EdinetError::Transport("connection reset".to_string()));
            }
            let financials = if code.starts_with("EMPTY") {
                Vec::new()
            } else {
                Self::periods()
            };
            Ok(FinancialDocument {
                financials,
                ..Default::default()
            })
        }

        async fn ranking(
            &self,
            _metric: &str,
            _limit: u32,
            _order: &str,
        ) -> Result<RankingResponse, EdinetError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RankingResponse::default())
        }
    }

    fn service() -> AnalysisService<StubSource> {
        AnalysisService::new(StubSource::default())
    }

    fn codes(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_compare_rejects_single_code() {
        let service = service();
        let err = service.compare(&codes(&["E02367"]), None).await.unwrap_err();
        assert!(matches!(err, EdinetError::Validation(_)));
        assert_eq!(service.source().upstream_calls(), 0);
    }

    #[tokio::test]
    async fn test_compare_rejects_eleven_codes() {
        let service = service();
        let eleven: Vec<String> = (0..11).map(|i| format!("E{:05}", i)).collect();
        let err = service.compare(&eleven, None).await.unwrap_err();
        assert!(matches!(err, EdinetError::Validation(_)));
        assert_eq!(service.source().upstream_calls(), 0);
    }

    #[tokio::test]
    async fn test_compare_two_resolvable_codes() {
        let service = service();
        let result = service
            .compare(&codes(&["E02367", "E01825"]), None)
            .await
            .unwrap();

        assert_eq!(result.successes.len(), 2);
        assert!(result.failures.is_empty());
        assert_eq!(result.successes[0].code, "E02367");
        assert_eq!(result.successes[1].code, "E01825");
    }

    #[tokio::test]
    async fn test_compare_isolates_per_company_failure() {
        let service = service();
        let result = service
            .compare(&codes(&["E00001", "BAD01", "E00002"]), None)
            .await
            .unwrap();

        assert_eq!(result.successes.len(), 2);
        assert_eq!(result.failures.len(), 1);
        // input order preserved within each partition
        assert_eq!(result.successes[0].code, "E00001");
        assert_eq!(result.successes[1].code, "E00002");
        assert_eq!(result.failures[0].code, "BAD01");
        assert!(!result.failures[0].error.is_empty());
    }

    #[tokio::test]
    async fn test_compare_processes_duplicates_independently() {
        let service = service();
        let result = service
            .compare(&codes(&["E00001", "E00001"]), None)
            .await
            .unwrap();
        assert_eq!(result.successes.len(), 2);
    }

    #[tokio::test]
    async fn test_compare_windows_each_lane() {
        let service = service();
        let result = service
            .compare(&codes(&["E00001", "E00002"]), Some(2))
            .await
            .unwrap();
        assert!(result
            .successes
            .iter()
            .all(|s| s.financials.financials.len() == 2));
    }

    #[tokio::test]
    async fn test_ranking_invalid_metric_fails_before_upstream() {
        let service = service();
        let err = service
            .ranking("invalid_metric", 10, "desc")
            .await
            .unwrap_err();
        assert!(matches!(err, EdinetError::Validation(_)));
        assert_eq!(service.source().upstream_calls(), 0);
    }

    #[tokio::test]
    async fn test_ranking_validates_limit_and_order() {
        let service = service();
        assert!(matches!(
            service.ranking("roe", 0, "desc").await.unwrap_err(),
            EdinetError::Validation(_)
        ));
        assert!(matches!(
            service.ranking("roe", 101, "desc").await.unwrap_err(),
            EdinetError::Validation(_)
        ));
        assert!(matches!(
            service.ranking("roe", 10, "sideways").await.unwrap_err(),
            EdinetError::Validation(_)
        ));
        assert_eq!(service.source().upstream_calls(), 0);

        assert!(service.ranking("roe", 10, "desc").await.is_ok());
    }

    #[tokio::test]
    async fn test_search_truncates_only_with_query() {
        let service = service();

        let with_query = service
            .search_companies(Some("holdings"), 10, 1)
            .await
            .unwrap();
        assert_eq!(with_query.len(), 10);

        // listing branch pages upstream instead
        let without_query = service.search_companies(None, 10, 1).await.unwrap();
        assert_eq!(without_query.len(), 30);
    }

    #[tokio::test]
    async fn test_search_validates_ranges() {
        let service = service();
        for (per_page, page) in [(0, 1), (101, 1), (10, 0)] {
            let err = service
                .search_companies(None, per_page, page)
                .await
                .unwrap_err();
            assert!(matches!(err, EdinetError::Validation(_)));
        }
        assert_eq!(service.source().upstream_calls(), 0);
    }

    #[tokio::test]
    async fn test_financials_windowed_by_years() {
        let service = service();
        let doc = service.financials("E00001", Some(3)).await.unwrap();
        assert_eq!(doc.financials.len(), 3);
        assert_eq!(doc.financials[0].fiscal_period.as_deref(), Some("FY2024"));

        let doc = service.financials("E00001", None).await.unwrap();
        assert_eq!(doc.financials.len(), 5);
    }

    #[tokio::test]
    async fn test_analysis_rates_latest_period() {
        let service = service();
        let report = service.analysis("E00001", None).await.unwrap();

        assert_eq!(report.company.code, "E00001");
        assert_eq!(
            report.latest_period.fiscal_period.as_deref(),
            Some("FY2024")
        );
        assert_eq!(report.ratings.profitability, Rating::Excellent);
        assert_eq!(report.ratings.efficiency, Rating::NeedsImprovement);
        assert_eq!(report.ratings.stability, Rating::Unrated);
    }

    #[tokio::test]
    async fn test_analysis_empty_series_is_not_found() {
        let service = service();
        let err = service.analysis("EMPTY01", None).await.unwrap_err();
        assert!(matches!(err, EdinetError::NotFound(_)));
    }
}
