use crate::{category::CostCategory, lenient, process::yes};
use serde::{Deserialize, Serialize};

fn ten_years() -> u32 {
    10
}

fn full_curve() -> Vec<f64> {
    vec![100.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapexItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    /// In-service year. Informational: spend follows the project curve.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub year: i32,
    #[serde(default = "ten_years", deserialize_with = "lenient::years")]
    pub depr_years: u32,
    #[serde(default)]
    pub category: CostCategory,
}

impl Default for CapexItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: 0.0,
            year: 0,
            depr_years: ten_years(),
            category: CostCategory::Equipment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceInputs {
    #[serde(default = "ten_years", deserialize_with = "lenient::years")]
    pub horizon_years: u32,
    /// Calendar label for year 0 in reports.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub start_year: i32,
    /// Zero means the project is costed only; NPV is then a net present cost.
    #[serde(default, deserialize_with = "lenient::number")]
    pub selling_price_per_t: f64,
    #[serde(default = "yes", deserialize_with = "lenient::flag")]
    pub include_depreciation: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub capex_items: Vec<CapexItem>,
    /// Spend split at offsets -1, 0, 1, ... from the in-service year.
    /// Renormalized, so it need not sum to 100.
    #[serde(default = "full_curve", deserialize_with = "lenient::numbers")]
    pub capex_curve_pct: Vec<f64>,
}

impl Default for FinanceInputs {
    fn default() -> Self {
        Self {
            horizon_years: ten_years(),
            start_year: 0,
            selling_price_per_t: 0.0,
            include_depreciation: true,
            capex_items: Vec::new(),
            capex_curve_pct: full_curve(),
        }
    }
}
