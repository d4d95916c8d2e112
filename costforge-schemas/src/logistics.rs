use crate::{
    lenient,
    process::{benchmark, yes},
};
use serde::{Deserialize, Serialize};

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub units_per_t: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub cost_unit: Option<String>,
    #[serde(default = "benchmark", deserialize_with = "lenient::text")]
    pub price_source: String,
    #[serde(default = "yes", deserialize_with = "lenient::flag")]
    pub taxable: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub note: String,
}

impl Default for PackagingRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            units_per_t: 0.0,
            unit_cost: 0.0,
            cost_unit: None,
            price_source: benchmark(),
            taxable: true,
            note: String::new(),
        }
    }
}

/// Road/rail leg priced per tonne-kilometre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Wet tonnes hauled per tonne of product.
    #[serde(default = "one", deserialize_with = "lenient::number")]
    pub wet_t_per_t: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub distance_km: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub tariff_per_tkm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub cost_unit: Option<String>,
    #[serde(default = "benchmark", deserialize_with = "lenient::text")]
    pub price_source: String,
    #[serde(default = "yes", deserialize_with = "lenient::flag")]
    pub taxable: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub note: String,
}

impl Default for TransportRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            wet_t_per_t: 1.0,
            distance_km: 0.0,
            tariff_per_tkm: 0.0,
            cost_unit: None,
            price_source: benchmark(),
            taxable: true,
            note: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub kg_per_t: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub disposal_cost_per_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub cost_unit: Option<String>,
    #[serde(default = "benchmark", deserialize_with = "lenient::text")]
    pub price_source: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub taxable: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub note: String,
}

impl Default for WasteRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            kg_per_t: 0.0,
            disposal_cost_per_kg: 0.0,
            cost_unit: None,
            price_source: benchmark(),
            taxable: false,
            note: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transport_assumes_one_wet_tonne_per_tonne() {
        let row: TransportRow =
            serde_json::from_value(json!({ "distance_km": 50, "tariff_per_tkm": 0.6 })).unwrap();
        assert_eq!(row.wet_t_per_t, 1.0);
        assert!(row.taxable);
    }

    #[test]
    fn packaging_is_taxable_and_waste_is_not_by_default() {
        let pack: PackagingRow = serde_json::from_value(json!({})).unwrap();
        let waste: WasteRow = serde_json::from_value(json!({})).unwrap();
        assert!(pack.taxable);
        assert!(!waste.taxable);
    }
}
