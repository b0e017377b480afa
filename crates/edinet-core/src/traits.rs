use async_trait::async_trait;

use crate::{CompanyDetail, CompanySummary, EdinetError, FinancialDocument, RankingResponse};

/// Source of normalized company disclosure data.
///
/// Implemented by the HTTP gateway; the façade operations only see this
/// seam, so batch behavior can be exercised against a stub.
#[async_trait]
pub trait CompanyDataSource: Send + Sync {
    async fn search_companies(
        &self,
        query: Option<&str>,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<CompanySummary>, EdinetError>;

    async fn company_detail(&self, code: &str) -> Result<CompanyDetail, EdinetError>;

    async fn financials(&self, code: &str) -> Result<FinancialDocument, EdinetError>;

    async fn ranking(
        &self,
        metric: &str,
        limit: u32,
        order: &str,
    ) -> Result<RankingResponse, EdinetError>;
}
