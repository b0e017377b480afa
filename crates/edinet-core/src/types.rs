use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rating::RatingSummary;

/// One row of a company search result, normalized from whichever key
/// variants the provider used. Empty string means the provider did not
/// report the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub edinet_code: String,
    pub name: String,
    pub securities_code: String,
    pub industry: String,
}

/// Full company record as returned by the detail endpoint. Single-entity
/// documents are not normalized; fields the provider omitted stay absent
/// and everything not individually modeled is carried in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edinet_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub securities_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub established_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One fiscal period of reported financials. Null and absent values both
/// decode to `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year_end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_sales: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinary_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_assets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roe: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_margin: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Financials document under the canonical `financials` envelope key.
/// Periods are ordered newest-first by the provider and never re-sorted.
/// Sibling top-level fields from the original document ride along in
/// `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialDocument {
    #[serde(default)]
    pub financials: Vec<FinancialPeriod>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One ranking row, already ordered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub edinet_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ranking document, passed through without reshaping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingResponse {
    #[serde(default)]
    pub ranking: Vec<RankingEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Successful lane of a multi-company comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSuccess {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub info: CompanyDetail,
    pub financials: FinancialDocument,
}

/// Failed lane of a multi-company comparison. The error is already
/// rendered to a message; batch callers only relay it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonFailure {
    pub code: String,
    pub error: String,
}

/// Result of comparing several companies. Both partitions preserve the
/// input code order; one company failing never empties the other
/// partition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub successes: Vec<ComparisonSuccess>,
    pub failures: Vec<ComparisonFailure>,
}

/// Company header of an analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisCompany {
    pub code: String,
    pub name: Option<String>,
    pub industry: Option<String>,
    pub securities_code: Option<String>,
}

/// Identification of the period the report was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisPeriod {
    pub fiscal_period: Option<String>,
    pub fiscal_year_end_date: Option<String>,
}

/// Income-statement figures of the newest period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceFigures {
    pub net_sales: Option<f64>,
    pub operating_income: Option<f64>,
    pub ordinary_income: Option<f64>,
    pub net_income: Option<f64>,
}

/// Balance-sheet figures of the newest period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceFigures {
    pub total_assets: Option<f64>,
    pub net_assets: Option<f64>,
    pub equity: Option<f64>,
}

/// Provider-computed ratios of the newest period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorFigures {
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub equity_ratio: Option<f64>,
    pub operating_margin: Option<f64>,
}

/// Financial-health summary derived from the newest windowed period of a
/// company's time series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub company: AnalysisCompany,
    pub latest_period: AnalysisPeriod,
    pub performance: PerformanceFigures,
    pub balance: BalanceFigures,
    pub indicators: IndicatorFigures,
    pub ratings: RatingSummary,
}

impl AnalysisReport {
    /// Build a report for `code` from its detail record and the newest
    /// period of its (already windowed) time series.
    pub fn from_latest(code: &str, info: &CompanyDetail, latest: &FinancialPeriod) -> Self {
        Self {
            company: AnalysisCompany {
                code: code.to_string(),
                name: info.name.clone(),
                industry: info.industry.clone(),
                securities_code: info.securities_code.clone(),
            },
            latest_period: AnalysisPeriod {
                fiscal_period: latest.fiscal_period.clone(),
                fiscal_year_end_date: latest.fiscal_year_end_date.clone(),
            },
            performance: PerformanceFigures {
                net_sales: latest.net_sales,
                operating_income: latest.operating_income,
                ordinary_income: latest.ordinary_income,
                net_income: latest.net_income,
            },
            balance: BalanceFigures {
                total_assets: latest.total_assets,
                net_assets: latest.net_assets,
                equity: latest.equity,
            },
            indicators: IndicatorFigures {
                roe: latest.roe,
                roa: latest.roa,
                equity_ratio: latest.equity_ratio,
                operating_margin: latest.operating_margin,
            },
            ratings: RatingSummary::from_indicators(latest.roe, latest.roa, latest.equity_ratio),
        }
    }
}
