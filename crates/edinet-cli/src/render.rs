//! Terminal rendering for the CLI subcommands.

use edinet_core::{
    AnalysisReport, CompanyDetail, CompanySummary, ComparisonResult, FinancialDocument,
    FinancialPeriod, RankingEntry,
};

const WIDE: usize = 100;
const NARROW: usize = 80;

fn banner(title: &str, width: usize) {
    println!("\n{}", "=".repeat(width));
    println!("{}", title);
    println!("{}", "=".repeat(width));
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn opt_or_na(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or("N/A")
}

/// Comma-grouped yen amount, N/A when the provider reported nothing.
pub fn format_amount(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "N/A".to_string();
    };

    let digits = format!("{:.0}", v.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if v < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Two-decimal percentage, N/A when the provider reported nothing.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

pub fn company_list(companies: &[CompanySummary]) {
    banner("Companies", NARROW);

    if companies.is_empty() {
        println!("\nNo companies found");
        return;
    }

    for (i, company) in companies.iter().enumerate() {
        println!("\n{}. {}", i + 1, or_na(&company.name));
        println!("   EDINET code: {}", or_na(&company.edinet_code));
        println!("   Securities code: {}", or_na(&company.securities_code));
        if !company.industry.is_empty() {
            println!("   Industry: {}", company.industry);
        }
    }
}

pub fn company_detail(detail: &CompanyDetail) {
    banner(
        &format!("Company: {}", opt_or_na(detail.name.as_deref())),
        NARROW,
    );

    println!("\nEDINET code: {}", opt_or_na(detail.edinet_code.as_deref()));
    println!(
        "Securities code: {}",
        opt_or_na(detail.securities_code.as_deref())
    );
    println!("Industry: {}", opt_or_na(detail.industry.as_deref()));
    println!("Address: {}", opt_or_na(detail.address.as_deref()));
    println!(
        "Established: {}",
        opt_or_na(detail.established_date.as_deref())
    );
}

pub fn financials(company_name: &str, doc: &FinancialDocument) {
    banner(&format!("Financials: {}", company_name), NARROW);

    let Some(latest) = doc.financials.first() else {
        println!("\nNo financial data found");
        return;
    };

    println!(
        "\nFiscal period: {}",
        opt_or_na(latest.fiscal_period.as_deref())
    );
    println!(
        "Fiscal year end: {}",
        opt_or_na(latest.fiscal_year_end_date.as_deref())
    );

    println!("\n[Income statement]");
    println!("  Net sales: {} JPY", format_amount(latest.net_sales));
    println!(
        "  Operating income: {} JPY",
        format_amount(latest.operating_income)
    );
    println!(
        "  Ordinary income: {} JPY",
        format_amount(latest.ordinary_income)
    );
    println!("  Net income: {} JPY", format_amount(latest.net_income));

    println!("\n[Balance sheet]");
    println!("  Total assets: {} JPY", format_amount(latest.total_assets));
    println!("  Net assets: {} JPY", format_amount(latest.net_assets));
    println!("  Equity: {} JPY", format_amount(latest.equity));

    println!("\n[Indicators]");
    println!("  ROE: {} %", format_percent(latest.roe));
    println!("  ROA: {} %", format_percent(latest.roa));
    println!("  Equity ratio: {} %", format_percent(latest.equity_ratio));
    println!(
        "  Operating margin: {} %",
        format_percent(latest.operating_margin)
    );

    if doc.financials.len() > 1 {
        println!("\nPeriods retrieved: {}", doc.financials.len());
    }
}

pub fn ranking(metric: &str, entries: &[RankingEntry]) {
    let metric_label = match metric {
        "roe" => "ROE (return on equity)",
        "roa" => "ROA (return on assets)",
        "sales" => "Net sales",
        "market_cap" => "Market capitalization",
        "operating_income" => "Operating income",
        other => other,
    };
    banner(&format!("{} ranking", metric_label), NARROW);

    if entries.is_empty() {
        println!("\nNo ranking data found");
        return;
    }

    let percent_metric = matches!(metric, "roe" | "roa");
    for (i, entry) in entries.iter().enumerate() {
        let value = if percent_metric {
            format!("{} %", format_percent(entry.value))
        } else {
            format!("{} JPY", format_amount(entry.value))
        };
        println!(
            "{:2}. {:<30} {:>24} ({})",
            i + 1,
            entry.name,
            value,
            or_na(&entry.edinet_code)
        );
    }
}

pub fn comparison(result: &ComparisonResult) {
    banner("Company comparison", WIDE);

    if !result.successes.is_empty() {
        print!("\n{:<20}", "Item");
        for success in &result.successes {
            let name = success.name.as_deref().unwrap_or(&success.code);
            let short: String = name.chars().take(16).collect();
            print!("{:>20}", short);
        }
        println!();
        println!("{}", "-".repeat(WIDE));

        type Accessor = fn(&FinancialPeriod) -> Option<f64>;
        let rows: [(&str, Accessor, bool); 8] = [
            ("Net sales", |p| p.net_sales, false),
            ("Operating income", |p| p.operating_income, false),
            ("Net income", |p| p.net_income, false),
            ("Total assets", |p| p.total_assets, false),
            ("Net assets", |p| p.net_assets, false),
            ("ROE", |p| p.roe, true),
            ("ROA", |p| p.roa, true),
            ("Equity ratio", |p| p.equity_ratio, true),
        ];

        for (label, accessor, percent) in rows {
            print!("{:<20}", label);
            for success in &result.successes {
                let value = success.financials.financials.first().and_then(accessor);
                let rendered = if percent {
                    format_percent(value)
                } else {
                    format_amount(value)
                };
                print!("{:>20}", rendered);
            }
            println!();
        }
    }

    if !result.failures.is_empty() {
        println!("\nFailed codes:");
        for failure in &result.failures {
            println!("  {}: {}", failure.code, failure.error);
        }
    }
}

pub fn analysis(report: &AnalysisReport) {
    banner(
        &format!(
            "Analysis: {} ({})",
            opt_or_na(report.company.name.as_deref()),
            report.company.code
        ),
        NARROW,
    );

    println!(
        "\nFiscal period: {}",
        opt_or_na(report.latest_period.fiscal_period.as_deref())
    );
    println!(
        "Fiscal year end: {}",
        opt_or_na(report.latest_period.fiscal_year_end_date.as_deref())
    );
    println!("Industry: {}", opt_or_na(report.company.industry.as_deref()));

    println!("\n[Performance]");
    println!(
        "  Net sales: {} JPY",
        format_amount(report.performance.net_sales)
    );
    println!(
        "  Operating income: {} JPY",
        format_amount(report.performance.operating_income)
    );
    println!(
        "  Net income: {} JPY",
        format_amount(report.performance.net_income)
    );

    println!("\n[Balance]");
    println!(
        "  Total assets: {} JPY",
        format_amount(report.balance.total_assets)
    );
    println!("  Equity: {} JPY", format_amount(report.balance.equity));

    println!("\n[Ratings]");
    println!(
        "  Profitability (ROE {} %): {}",
        format_percent(report.indicators.roe),
        report.ratings.profitability.to_label()
    );
    println!(
        "  Efficiency (ROA {} %): {}",
        format_percent(report.indicators.roa),
        report.ratings.efficiency.to_label()
    );
    println!(
        "  Stability (equity ratio {} %): {}",
        format_percent(report.indicators.equity_ratio),
        report.ratings.stability.to_label()
    );
}
