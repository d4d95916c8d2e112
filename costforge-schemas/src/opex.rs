use crate::{category::CostCategory, lenient};
use serde::{Deserialize, Serialize};

/// Manual OPEX entry, independent of throughput.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default)]
    pub category: CostCategory,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_cost: f64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub taxable: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub account_code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub driver: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Between 0 and 1.
    #[serde(default, deserialize_with = "lenient::number")]
    pub probability: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub impact_cost: f64,
}

impl Risk {
    /// Expected monetary value.
    pub fn emv(&self) -> f64 {
        self.probability * self.impact_cost
    }
}

/// Reference hourly rate, used when keying in labor line items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaborRate {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub hourly: f64,
}
