use serde::{Deserialize, Serialize};

/// Ordinal financial-health tier. `Unrated` is the sentinel for a ratio
/// the provider did not report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
    Unrated,
}

impl Rating {
    /// Human-readable label for the tier
    pub fn to_label(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Average => "Average",
            Rating::NeedsImprovement => "Needs Improvement",
            Rating::Unrated => "Unrated",
        }
    }

    /// Numeric tier, higher is better. `Unrated` sits below every tier.
    pub fn to_tier(&self) -> u8 {
        match self {
            Rating::Excellent => 4,
            Rating::Good => 3,
            Rating::Average => 2,
            Rating::NeedsImprovement => 1,
            Rating::Unrated => 0,
        }
    }
}

// Inclusive lower bounds per ratio, best tier first. Boundary values
// belong to the higher tier.
const ROE_BOUNDS: [f64; 3] = [15.0, 10.0, 5.0];
const ROA_BOUNDS: [f64; 3] = [10.0, 5.0, 2.0];
const EQUITY_RATIO_BOUNDS: [f64; 3] = [50.0, 30.0, 20.0];

fn classify(value: Option<f64>, bounds: &[f64; 3]) -> Rating {
    let Some(v) = value else {
        return Rating::Unrated;
    };
    if v >= bounds[0] {
        Rating::Excellent
    } else if v >= bounds[1] {
        Rating::Good
    } else if v >= bounds[2] {
        Rating::Average
    } else {
        Rating::NeedsImprovement
    }
}

/// Rate profitability from ROE (%).
pub fn rate_profitability(roe: Option<f64>) -> Rating {
    classify(roe, &ROE_BOUNDS)
}

/// Rate asset efficiency from ROA (%).
pub fn rate_efficiency(roa: Option<f64>) -> Rating {
    classify(roa, &ROA_BOUNDS)
}

/// Rate balance-sheet stability from the equity ratio (%).
pub fn rate_stability(equity_ratio: Option<f64>) -> Rating {
    classify(equity_ratio, &EQUITY_RATIO_BOUNDS)
}

/// Ratings for the three tracked ratios of one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub profitability: Rating,
    pub efficiency: Rating,
    pub stability: Rating,
}

impl RatingSummary {
    pub fn from_indicators(
        roe: Option<f64>,
        roa: Option<f64>,
        equity_ratio: Option<f64>,
    ) -> Self {
        Self {
            profitability: rate_profitability(roe),
            efficiency: rate_efficiency(roa),
            stability: rate_stability(equity_ratio),
        }
    }
}
