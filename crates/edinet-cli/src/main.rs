//! Command-line client for the EDINET financial analysis service.
//!
//! Usage:
//!   edinet-cli search "Nintendo"
//!   edinet-cli info E02367
//!   edinet-cli financials E02367 --years 5
//!   edinet-cli ranking roe --limit 20
//!   edinet-cli compare E02367 E01825 E02503
//!   edinet-cli analysis E02367

use analysis_service::AnalysisService;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod export;
mod render;

#[derive(Debug, Parser)]
#[command(author, version, about = "Fetch and analyze financial disclosures of Japanese listed companies")]
struct Args {
    /// EDINET DB API key; defaults to the EDINET_API_KEY environment variable
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search companies by name
    Search {
        /// Keyword (company name); omit to page through the full listing
        query: Option<String>,

        /// Rows per page (1-100)
        #[arg(long, default_value_t = 10)]
        per_page: u32,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Write the result to a CSV file
        #[arg(long, value_name = "FILE")]
        export: Option<String>,
    },

    /// Show a company's detail record
    Info {
        /// EDINET company code, e.g. E02367
        code: String,
    },

    /// Show a company's financial data
    Financials {
        /// EDINET company code, e.g. E02367
        code: String,

        /// Keep only the newest N fiscal periods
        #[arg(long)]
        years: Option<i64>,
    },

    /// Show a metric ranking
    Ranking {
        /// roe, roa, sales, market_cap or operating_income
        metric: String,

        /// Rows to return (1-100)
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: String,

        /// Write the result to a CSV file
        #[arg(long, value_name = "FILE")]
        export: Option<String>,
    },

    /// Compare several companies side by side
    Compare {
        /// 2-10 EDINET company codes
        #[arg(required = true)]
        codes: Vec<String>,

        /// Keep only the newest N fiscal periods per company
        #[arg(long)]
        years: Option<i64>,
    },

    /// Rate a company's financial health from its newest period
    Analysis {
        /// EDINET company code, e.g. E02367
        code: String,

        /// Keep only the newest N fiscal periods
        #[arg(long)]
        years: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "edinet_cli=warn".into()),
        )
        .init();

    let args = Args::parse();

    let api_key = args
        .api_key
        .or_else(|| std::env::var("EDINET_API_KEY").ok())
        .context("no API key configured: pass --api-key or set EDINET_API_KEY")?;

    let service = AnalysisService::from_api_key(api_key);

    match args.command {
        Command::Search {
            query,
            per_page,
            page,
            export,
        } => {
            let companies = service
                .search_companies(query.as_deref(), per_page, page)
                .await?;
            render::company_list(&companies);
            if let Some(path) = export {
                let rows = export::companies_csv(&path, &companies)?;
                println!("\nExported {} rows to {}", rows, path);
            }
        }

        Command::Info { code } => {
            let detail = service.company_detail(&code).await?;
            render::company_detail(&detail);
        }

        Command::Financials { code, years } => {
            let detail = service.company_detail(&code).await?;
            let doc = service.financials(&code, years).await?;
            render::financials(detail.name.as_deref().unwrap_or(&code), &doc);
        }

        Command::Ranking {
            metric,
            limit,
            order,
            export,
        } => {
            let response = service.ranking(&metric, limit, &order).await?;
            render::ranking(&metric, &response.ranking);
            if let Some(path) = export {
                let rows = export::ranking_csv(&path, &response.ranking)?;
                println!("\nExported {} rows to {}", rows, path);
            }
        }

        Command::Compare { codes, years } => {
            let result = service.compare(&codes, years).await?;
            render::comparison(&result);
        }

        Command::Analysis { code, years } => {
            let report = service.analysis(&code, years).await?;
            render::analysis(&report);
        }
    }

    Ok(())
}
