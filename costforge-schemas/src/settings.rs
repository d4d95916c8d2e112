use crate::{category::CostCategory, lenient, process::yes};
use serde::{Deserialize, Serialize};

fn default_overhead_base() -> Vec<CostCategory> {
    vec![CostCategory::Labor, CostCategory::Logistics]
}

/// Global costing percentages. Absent keys count as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient::number")]
    pub tax_pct: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub contingency_pct: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub overhead_pct: f64,
    /// Categories overhead is charged on.
    #[serde(default = "default_overhead_base", deserialize_with = "lenient::or_default")]
    pub overhead_base: Vec<CostCategory>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub escalation_pct_per_year: f64,
    #[serde(default = "yes", deserialize_with = "lenient::flag")]
    pub discount_nominal: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tax_pct: 0.0,
            contingency_pct: 0.0,
            overhead_pct: 0.0,
            overhead_base: default_overhead_base(),
            escalation_pct_per_year: 0.0,
            discount_nominal: true,
        }
    }
}
